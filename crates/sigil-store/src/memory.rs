// crates/sigil-store/src/memory.rs
//
// In-memory signed event store implementing the `SignedEventStore` trait.
//
// Same semantics as the RocksDB store (internal id assignment, overwrite on
// matching event_id) without persistence. Used by tests and `--ephemeral`
// daemon runs.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use sigil_core::error::SigilError;
use sigil_core::event::SignedEventRecord;
use sigil_core::traits::SignedEventStore;

use crate::prepare_record;

/// In-memory event store keyed by `event_id`.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    events: RwLock<HashMap<String, SignedEventRecord>>,
}

impl InMemoryEventStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the number of records currently stored.
    pub fn len(&self) -> usize {
        self.events.read().map(|events| events.len()).unwrap_or(0)
    }

    /// Return whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SignedEventStore for InMemoryEventStore {
    async fn get_event(&self, event_id: &str) -> Result<Option<SignedEventRecord>, SigilError> {
        let events = self
            .events
            .read()
            .map_err(|e| SigilError::Storage(format!("RwLock poisoned: {}", e)))?;
        Ok(events.get(event_id).cloned())
    }

    async fn save_event(&self, record: SignedEventRecord) -> Result<(), SigilError> {
        let (event_id, record) = prepare_record(record)?;
        let mut events = self
            .events
            .write()
            .map_err(|e| SigilError::Storage(format!("RwLock poisoned: {}", e)))?;
        events.insert(event_id, record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    #[tokio::test]
    async fn test_save_and_get() {
        let store = InMemoryEventStore::new();
        assert!(store.is_empty());

        let record = SignedEventRecord::from_value(json!({"event_id": "evt-1", "foo": "bar"})).unwrap();
        store.save_event(record).await.unwrap();
        assert_eq!(store.len(), 1);

        let found = store.get_event("evt-1").await.unwrap().unwrap();
        assert!(found.internal_id().is_some());
        assert_eq!(found.get("foo"), Some(&json!("bar")));
    }

    #[tokio::test]
    async fn test_get_missing() {
        let store = InMemoryEventStore::new();
        assert!(store.get_event("evt-404").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_rejects_record_without_event_id() {
        let store = InMemoryEventStore::new();
        let mut fields = Map::new();
        fields.insert("foo".to_string(), json!("bar"));

        let err = store
            .save_event(SignedEventRecord::from_fields(fields))
            .await
            .unwrap_err();
        assert!(matches!(err, SigilError::InvalidRecord(_)));
        assert!(store.is_empty());
    }
}
