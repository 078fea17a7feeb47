use thiserror::Error;

#[derive(Error, Debug)]
pub enum A11yError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Convenience type alias for Results with A11yError
pub type Result<T> = std::result::Result<T, A11yError>;
