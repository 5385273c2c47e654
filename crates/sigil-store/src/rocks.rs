// crates/sigil-store/src/rocks.rs
//
// RocksDB-backed persistent storage for signed events.
//
// Key format:
//   - Primary: `{collection}:{event_id}` -> JSON-serialized record (with `_id`)
//
// The collection prefix lets several logical collections share one database
// without their event ids colliding. Collection names may not contain `:`,
// so the first `:` in a key always ends the prefix.

use async_trait::async_trait;
use rocksdb::{DBWithThreadMode, MultiThreaded, Options};

use sigil_core::error::SigilError;
use sigil_core::event::SignedEventRecord;
use sigil_core::traits::SignedEventStore;

use crate::descriptor::StoreDescriptor;
use crate::prepare_record;

/// RocksDB wrapper implementing the `SignedEventStore` trait.
#[derive(Debug)]
pub struct RocksEventStore {
    db: DBWithThreadMode<MultiThreaded>,
    collection: String,
}

impl RocksEventStore {
    /// Open the database described by `descriptor`.
    ///
    /// Creates the database directory, and any missing parents, if it does
    /// not exist.
    pub fn open(descriptor: &StoreDescriptor) -> Result<Self, SigilError> {
        if descriptor.collection.is_empty() || descriptor.collection.contains(':') {
            return Err(SigilError::Storage(format!(
                "Invalid collection name {:?}: must be non-empty and contain no ':'",
                descriptor.collection
            )));
        }

        let path = descriptor.database_path();
        std::fs::create_dir_all(&path).map_err(|e| {
            SigilError::Storage(format!("Failed to create {}: {}", path.display(), e))
        })?;

        let mut opts = Options::default();
        opts.create_if_missing(true);

        let db = DBWithThreadMode::<MultiThreaded>::open(&opts, &path).map_err(|e| {
            SigilError::Storage(format!("Failed to open RocksDB at {}: {}", path.display(), e))
        })?;

        Ok(Self {
            db,
            collection: descriptor.collection.clone(),
        })
    }

    /// Build the primary key for an event: `{collection}:{event_id}`.
    fn event_key(&self, event_id: &str) -> Vec<u8> {
        format!("{}:{}", self.collection, event_id).into_bytes()
    }

    /// Put raw bytes into RocksDB, mapping errors to SigilError::Storage.
    fn put_raw(&self, key: &[u8], value: &[u8]) -> Result<(), SigilError> {
        self.db
            .put(key, value)
            .map_err(|e| SigilError::Storage(format!("RocksDB put failed: {}", e)))
    }

    /// Get raw bytes from RocksDB, mapping errors to SigilError::Storage.
    fn get_raw(&self, key: &[u8]) -> Result<Option<Vec<u8>>, SigilError> {
        self.db
            .get(key)
            .map_err(|e| SigilError::Storage(format!("RocksDB get failed: {}", e)))
    }

    /// Get an event by id without going through the async trait.
    pub fn get_event_sync(&self, event_id: &str) -> Result<Option<SignedEventRecord>, SigilError> {
        match self.get_raw(&self.event_key(event_id))? {
            Some(bytes) => {
                let record: SignedEventRecord = serde_json::from_slice(&bytes)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// Store an event synchronously.
    pub fn save_event_sync(&self, record: SignedEventRecord) -> Result<(), SigilError> {
        let (event_id, record) = prepare_record(record)?;
        let json = serde_json::to_vec(&record)?;
        self.put_raw(&self.event_key(&event_id), &json)
    }

    /// The collection this handle reads and writes.
    pub fn collection(&self) -> &str {
        &self.collection
    }
}

#[async_trait]
impl SignedEventStore for RocksEventStore {
    async fn get_event(&self, event_id: &str) -> Result<Option<SignedEventRecord>, SigilError> {
        self.get_event_sync(event_id)
    }

    async fn save_event(&self, record: SignedEventRecord) -> Result<(), SigilError> {
        self.save_event_sync(record)
    }
}
