use thiserror::Error;

/// Errors produced by model constructors and parsing routines.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Session {0} has no scheduled instance")]
    MissingInstance(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Malformed session data: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
