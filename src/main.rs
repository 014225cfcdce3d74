use std::env;
use std::fs::File;

use env_logger::{Builder, Target};
use recipe_finder::FinderConfig;

const LOG_FILE: &str = "recipe-finder.log";

/// Pipe logs to a file: stderr is unusable under the alternate screen.
/// Logging stays off unless RUST_LOG is set.
fn init_logging() {
    if env::var_os("RUST_LOG").is_none() {
        return;
    }
    if let Ok(file) = File::create(LOG_FILE) {
        Builder::from_default_env()
            .target(Target::Pipe(Box::new(file)))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = FinderConfig::load()?;
    // An optional first argument pre-fills the search input
    let initial_query = env::args().nth(1);

    recipe_finder::run(config, initial_query).await?;
    Ok(())
}
