//! Error types for the pickup-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the pickup library.
#[derive(Error, Debug)]
pub enum PickupError {
    /// Persistence error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Batch input contained no non-blank segment.
    #[error("input is empty")]
    EmptyInput,

    /// Batch input had segments, but none yielded a complete parcel.
    #[error("no valid parcel messages in input")]
    NoValidMessages,

    /// A selector did not resolve to any stored record.
    #[error("no parcel matches '{0}'")]
    NotFound(String),
}

/// Errors related to loading and saving the parcel collection.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error while reading or writing the store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored document is not a valid parcel collection.
    #[error("malformed store at {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },

    /// Failed to serialize the collection.
    #[error("failed to serialize parcels: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    /// Whether the error means the document exists but cannot be parsed.
    pub fn is_malformed(&self) -> bool {
        matches!(self, StoreError::Malformed { .. })
    }
}

impl PickupError {
    /// Whether the error stems from an unreadable store document.
    pub fn is_malformed_store(&self) -> bool {
        matches!(self, PickupError::Store(e) if e.is_malformed())
    }
}

/// Result type for the pickup library.
pub type Result<T> = std::result::Result<T, PickupError>;
