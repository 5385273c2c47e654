// crates/sigil-core/src/traits.rs

use async_trait::async_trait;

use crate::error::SigilError;
use crate::event::SignedEventRecord;
use crate::signer::SignerMethod;

/// Trait for signed event persistence.
///
/// Implemented by sigil-store (RocksDB and in-memory backends).
#[async_trait]
pub trait SignedEventStore: Send + Sync {
    /// Retrieve the record whose `event_id` equals the given value.
    /// Returned records still carry their internal `_id`.
    async fn get_event(&self, event_id: &str) -> Result<Option<SignedEventRecord>, SigilError>;

    /// Save a record, overwriting any record with the same `event_id`.
    async fn save_event(&self, record: SignedEventRecord) -> Result<(), SigilError>;
}

/// Trait for the remote signing service.
///
/// Implemented by sigil-rpc's HTTP client.
#[async_trait]
pub trait UpstreamSigner: Send + Sync {
    /// Issue one parameterless query and return the `result` member of the reply.
    async fn call(&self, method: SignerMethod) -> Result<serde_json::Value, SigilError>;
}
