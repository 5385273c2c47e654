use thiserror::Error;

/// Collaborator-level error types for the Sigil gateway.
#[derive(Debug, Error)]
pub enum SigilError {
    /// Storage layer error (RocksDB open/get/put).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Upstream signer error (network, timeout, bad status, malformed body).
    #[error("Upstream signer error: {0}")]
    Upstream(String),

    /// A record that cannot be persisted (e.g. no string `event_id`).
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

impl From<serde_json::Error> for SigilError {
    fn from(e: serde_json::Error) -> Self {
        SigilError::Serialization(e.to_string())
    }
}
