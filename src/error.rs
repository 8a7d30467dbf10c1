//! Error types for the scene renamer.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the scene renamer.
#[derive(Error, Debug)]
pub enum Error {
    // Parse errors
    #[error("NoEpisodeMarker: {0}")]
    NoEpisodeMarker(String),

    // File system errors
    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    // Plan errors
    #[error("Invalid plan file: {0}")]
    InvalidPlanFile(String),

    #[error("Plan validation failed: {0}")]
    PlanValidationError(String),

    #[error("Target collision: {0}")]
    TargetCollision(String),

    // Fallback errors
    #[error("Fallback unavailable: {0}")]
    FallbackUnavailable(String),

    // Pattern errors
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }
}
