use thiserror::Error;

/// Error type that captures common tracker failures.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Unknown frequency: {0}")]
    UnknownFrequency(String),
    #[error("Invalid reference: {0}")]
    InvalidRef(String),
}
