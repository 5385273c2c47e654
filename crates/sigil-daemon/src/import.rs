// crates/sigil-daemon/src/import.rs
//
// One-shot import of signed events from a JSON file into the record store.
//
// The file holds a JSON array of records; each must be an object with a
// string `event_id`. The first invalid record aborts the import.

use std::fs;

use serde_json::Value;

use sigil_core::error::SigilError;
use sigil_core::event::SignedEventRecord;
use sigil_core::traits::SignedEventStore;

/// Read `path` and save every record it holds. Returns the number imported.
pub async fn import_events(
    store: &dyn SignedEventStore,
    path: &str,
) -> Result<usize, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    let count = import_from_str(store, &contents).await?;
    tracing::info!("Imported {} signed events from {}", count, path);
    Ok(count)
}

async fn import_from_str(store: &dyn SignedEventStore, contents: &str) -> Result<usize, SigilError> {
    let records: Vec<Value> = serde_json::from_str(contents)?;
    let total = records.len();

    for (index, value) in records.into_iter().enumerate() {
        let record = SignedEventRecord::from_value(value)
            .map_err(|e| SigilError::InvalidRecord(format!("record #{}: {}", index, e)))?;
        store.save_event(record).await?;
    }

    Ok(total)
}
