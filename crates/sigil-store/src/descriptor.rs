// crates/sigil-store/src/descriptor.rs
//
// Resolved connection descriptor for the record store.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the signed events live: a base URI (filesystem directory for
/// RocksDB), a database name beneath it, and a collection name that
/// namespaces the keys inside that database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreDescriptor {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

impl StoreDescriptor {
    pub fn new(
        uri: impl Into<String>,
        database: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
            collection: collection.into(),
        }
    }

    /// Filesystem path of the database: `{uri}/{database}`.
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.uri).join(&self.database)
    }
}
