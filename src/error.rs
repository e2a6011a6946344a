use thiserror::Error;

/// Failure of the durable key/value store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage file is not a JSON object of strings: {0}")]
    Corrupt(#[source] serde_json::Error),

    #[error("storage serialization failed: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("storage lock poisoned")]
    Poisoned,
}

/// Failure while reading or writing the persisted cart
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("cart payload is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("cart payload has the wrong shape: {0}")]
    Shape(&'static str),

    #[error("cart could not be serialized: {0}")]
    Encode(#[source] serde_json::Error),
}
