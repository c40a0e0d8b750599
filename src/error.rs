//! Error types for the trend analysis service

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrendError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API error: {0}")]
    Api(String),

    /// Missing required tool argument. Rendered as a plain user-facing
    /// message at the dispatch boundary, never as an execution error.
    #[error("{0} is required")]
    MissingArgument(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

pub type Result<T> = std::result::Result<T, TrendError>;
