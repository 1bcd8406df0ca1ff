use std::io;
use thiserror::Error;

/// Failures of the durable storage medium behind the progress store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read '{key}': {source}")]
    Read {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to write '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("stored document '{key}' is malformed: {message}")]
    Parse { key: String, message: String },
    #[error("failed to encode '{key}': {message}")]
    Serialize { key: String, message: String },
}

#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<ProgressError> for io::Error {
    fn from(err: ProgressError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, err)
    }
}
