// crates/sigil-rpc/src/envelope.rs
//
// Request and response envelopes.
//
// Requests carry a method name and an ordered list of params; both are
// optional on the wire and read leniently: a non-string method is kept as
// its JSON text and non-array params count as no params. Responses are either a `result` (200) or a plain
// message with a status code.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::RpcError;

/// A JSON-RPC-style request envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// The RPC method to invoke. Empty when absent or null.
    #[serde(default, deserialize_with = "method_as_text")]
    pub method: String,
    /// Positional parameters. Empty when absent or not an array.
    #[serde(default, deserialize_with = "params_or_empty")]
    pub params: Vec<Value>,
}

impl JsonRpcRequest {
    pub fn new(method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }
}

fn method_as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(name) => name,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn params_or_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(params) => params,
        _ => Vec::new(),
    })
}

/// Outcome of dispatching one request. Exactly one shape per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RpcResponse {
    /// `{ "result": ... }`, served as JSON with status 200.
    Success { result: Value },
    /// A plain-text message served with the given status code.
    Failure { message: String, status_code: u16 },
}

impl RpcResponse {
    pub fn success(result: Value) -> Self {
        RpcResponse::Success { result }
    }

    /// HTTP status code for this response.
    pub fn status_code(&self) -> u16 {
        match self {
            RpcResponse::Success { .. } => 200,
            RpcResponse::Failure { status_code, .. } => *status_code,
        }
    }
}

impl From<RpcError> for RpcResponse {
    fn from(err: RpcError) -> Self {
        RpcResponse::Failure {
            status_code: err.status_code(),
            message: err.to_string(),
        }
    }
}
