// crates/sigil-core/src/event.rs
//
// SignedEventRecord: an opaque JSON object keyed by `event_id`.
//
// Records are persisted by an external process and carry arbitrary fields.
// The only field the gateway interprets is `event_id`; the store-internal
// `_id` field is stripped before a record leaves the gateway.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SigilError;

/// Name of the lookup key field present on every record.
pub const EVENT_ID_FIELD: &str = "event_id";

/// Name of the store-internal identity field. Never returned to clients.
pub const INTERNAL_ID_FIELD: &str = "_id";

/// A signed event record as held by the record store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignedEventRecord {
    fields: Map<String, Value>,
}

impl SignedEventRecord {
    /// Wrap an existing JSON object.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Build a record from an arbitrary JSON value.
    ///
    /// Fails unless the value is an object with a string `event_id`.
    pub fn from_value(value: Value) -> Result<Self, SigilError> {
        match value {
            Value::Object(fields) => {
                let record = Self { fields };
                if record.event_id().is_none() {
                    return Err(SigilError::InvalidRecord(format!(
                        "record has no string \"{}\" field",
                        EVENT_ID_FIELD
                    )));
                }
                Ok(record)
            }
            other => Err(SigilError::InvalidRecord(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// The record's `event_id`, if present and a string.
    pub fn event_id(&self) -> Option<&str> {
        self.fields.get(EVENT_ID_FIELD).and_then(Value::as_str)
    }

    /// The store-internal identity, if one has been assigned.
    pub fn internal_id(&self) -> Option<&Value> {
        self.fields.get(INTERNAL_ID_FIELD)
    }

    /// Assign the store-internal identity, replacing any previous one.
    pub fn set_internal_id(&mut self, id: impl Into<Value>) {
        self.fields.insert(INTERNAL_ID_FIELD.to_string(), id.into());
    }

    /// Read a field by name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Consume the record, dropping the store-internal identity field.
    ///
    /// This is the only form in which a record is handed to a client.
    pub fn into_public(mut self) -> Map<String, Value> {
        self.fields.remove(INTERNAL_ID_FIELD);
        self.fields
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
