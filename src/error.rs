use thiserror::Error;

/// Errors that can occur while talking to the catalog or driving the terminal
#[derive(Error, Debug)]
pub enum FinderError {
    /// Network failure, non-success HTTP status, or an undecodable response body
    #[error("catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Configuration file or environment parsing error
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Terminal setup or drawing error
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}
