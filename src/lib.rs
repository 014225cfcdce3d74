//! Terminal client for searching TheMealDB recipe catalog by ingredient.
//!
//! The crate is split into an async HTTP client for the catalog ([`api`]),
//! a pure application state machine ([`app`]), ratatui rendering ([`ui`]),
//! and the terminal event loop that ties them together ([`runtime`]).

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod model;
pub mod runtime;
pub mod ui;

pub use api::CatalogClient;
pub use app::App;
pub use config::FinderConfig;
pub use error::FinderError;
pub use model::{RecipeDetail, RecipeSummary};

/// Build the catalog client and run the interactive finder until the user
/// exits. `initial_query` pre-fills the search input without submitting it.
pub async fn run(config: FinderConfig, initial_query: Option<String>) -> Result<(), FinderError> {
    let client = CatalogClient::new(&config)?;
    let mut app = App::new(config.max_results);
    if let Some(query) = initial_query {
        app.input = query;
    }
    runtime::run_app(client, app).await
}
