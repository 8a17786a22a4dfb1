//! Error types for the aggregation engine

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, AtlasError>;

/// Main error type for the engine
#[derive(Error, Debug)]
pub enum AtlasError {
    /// One or more required source columns are absent
    #[error("Schema error: missing required columns: {0}")]
    Schema(String),

    /// The source had rows but none survived numeric coercion
    #[error("Type error: {0}")]
    Type(String),

    /// A required query parameter was not supplied
    #[error("Missing parameter: {0} parameter is required")]
    MissingParameter(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AtlasError {
    /// True for errors caused by the request rather than by the data
    pub fn is_bad_request(&self) -> bool {
        matches!(self, AtlasError::MissingParameter(_))
    }
}
