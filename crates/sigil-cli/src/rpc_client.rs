// crates/sigil-cli/src/rpc_client.rs
//
// Lightweight JSON-RPC client that POSTs to the sigil-daemon HTTP endpoint.
//
// Successful calls come back as `{"result": ...}` JSON; failures come back as
// plain text with a 4xx/5xx status.

use serde_json::Value;
use thiserror::Error;

use sigil_rpc::JsonRpcRequest;

/// Errors from a CLI-to-daemon call.
#[derive(Debug, Error)]
pub enum RpcCallError {
    #[error("Could not reach the daemon: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Error ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Daemon returned an unexpected body: {0}")]
    UnexpectedBody(String),
}

/// Raw status and body of a daemon reply.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcReply {
    pub status: u16,
    pub body: String,
}

impl RpcReply {
    /// Extract the `result` member of a 200 reply; anything else is an error.
    pub fn into_result(self) -> Result<Value, RpcCallError> {
        if self.status != 200 {
            return Err(RpcCallError::Rejected {
                status: self.status,
                message: self.body,
            });
        }

        let mut envelope: Value = serde_json::from_str(&self.body)
            .map_err(|_| RpcCallError::UnexpectedBody(self.body.clone()))?;
        envelope
            .get_mut("result")
            .map(Value::take)
            .ok_or(RpcCallError::UnexpectedBody(self.body))
    }
}

/// Send a JSON-RPC call to the daemon and return its `result`.
pub async fn rpc_call(
    endpoint: &str,
    method: &str,
    params: Vec<Value>,
) -> Result<Value, RpcCallError> {
    let request = JsonRpcRequest::new(method, params);

    let client = reqwest::Client::new();
    let resp = client.post(endpoint).json(&request).send().await?;

    let reply = RpcReply {
        status: resp.status().as_u16(),
        body: resp.text().await?,
    };
    reply.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_reply_yields_result() {
        let reply = RpcReply {
            status: 200,
            body: r#"{"result":{"event_id":"evt-1"}}"#.to_string(),
        };
        assert_eq!(reply.into_result().unwrap(), json!({"event_id": "evt-1"}));
    }

    #[test]
    fn test_error_reply_keeps_message() {
        let reply = RpcReply {
            status: 400,
            body: r#"bad method: "nope""#.to_string(),
        };
        let err = reply.into_result().unwrap_err();
        assert_eq!(err.to_string(), r#"Error (400): bad method: "nope""#);
    }

    #[test]
    fn test_ok_reply_without_result_is_unexpected() {
        let reply = RpcReply {
            status: 200,
            body: r#"{"success":true}"#.to_string(),
        };
        assert!(matches!(
            reply.into_result(),
            Err(RpcCallError::UnexpectedBody(_))
        ));
    }
}
