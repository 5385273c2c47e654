// crates/sigil-store/src/lib.rs
//
// sigil-store: Storage layer for the Sigil gateway.
//
// Provides a RocksDB-backed signed event store for production use and an
// in-memory store with identical semantics for tests and ephemeral runs.

pub mod descriptor;
pub mod memory;
pub mod rocks;

// Re-export key types for ergonomic access from downstream crates.
pub use descriptor::StoreDescriptor;
pub use memory::InMemoryEventStore;
pub use rocks::RocksEventStore;

use sigil_core::{SigilError, SignedEventRecord};

/// Validate a record for saving and assign a fresh internal `_id` if it has none.
///
/// Returns the record's `event_id` alongside the prepared record.
pub(crate) fn prepare_record(
    mut record: SignedEventRecord,
) -> Result<(String, SignedEventRecord), SigilError> {
    let event_id = record
        .event_id()
        .map(str::to_string)
        .ok_or_else(|| SigilError::InvalidRecord("record has no string \"event_id\" field".to_string()))?;

    if record.internal_id().is_none() {
        record.set_internal_id(uuid::Uuid::now_v7().to_string());
    }

    Ok((event_id, record))
}
