use s3::error::S3Error;
use thiserror::Error;

/// Errors surfaced by the storage facade
#[derive(Debug, Error)]
pub enum StorageError {
    /// Client construction or configuration parsing failed
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Failure reported by the underlying client, forwarded as-is
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Failures of a single put/remove request against the object store
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("S3 client error: {0}")]
    S3(#[from] S3Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Object store responded with status {code}: {body}")]
    Status { code: u16, body: String },

    #[error("Expected {expected} bytes from the content stream, got {actual}")]
    SizeMismatch { expected: u64, actual: u64 },

    #[error("Invalid object name: {0:?}")]
    InvalidObjectName(String),

    #[error("Invalid request metadata: {0:?}")]
    InvalidMetadata(String),
}

impl TransportError {
    /// Whether the store reported the object as missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, TransportError::Status { code: 404, .. })
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;
