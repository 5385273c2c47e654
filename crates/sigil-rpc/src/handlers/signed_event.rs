// crates/sigil-rpc/src/handlers/signed_event.rs
//
// getSignedEvent: look up a persisted signed event by `event_id`.
//
// Not found is a successful empty result, never an error.

use serde_json::{Map, Value};

use sigil_core::traits::SignedEventStore;

use crate::error::RpcError;

/// Handle a getSignedEvent request.
///
/// `params[0]` is the event id. The stored record is returned without its
/// internal `_id`; an unknown id (or a non-string id, which can never match a
/// stored one) yields `{}`.
pub async fn handle_get_signed_event(
    store: &dyn SignedEventStore,
    params: &[Value],
) -> Result<Value, RpcError> {
    let event_id = params.first().ok_or(RpcError::MissingParameter)?;

    let Some(event_id) = event_id.as_str() else {
        tracing::debug!("Non-string event id {}, returning empty result", event_id);
        return Ok(Value::Object(Map::new()));
    };

    let record = store.get_event(event_id).await.map_err(|e| {
        tracing::error!("Signed event lookup for {:?} failed: {}", event_id, e);
        RpcError::Internal(e)
    })?;

    match record {
        Some(record) => Ok(Value::Object(record.into_public())),
        None => {
            tracing::debug!("No signed event with id {:?}", event_id);
            Ok(Value::Object(Map::new()))
        }
    }
}
