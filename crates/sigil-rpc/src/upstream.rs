// crates/sigil-rpc/src/upstream.rs
//
// HTTP client for the upstream signing service.
//
// Each query is a JSON-RPC 2.0 POST with an empty params list:
//   {"jsonrpc":"2.0","method":"getPublicKey","params":[]}
// and the reply is expected to carry a `result` object.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use sigil_core::error::SigilError;
use sigil_core::signer::SignerMethod;
use sigil_core::traits::UpstreamSigner;

/// Upper bound on a single upstream query, connect to last body byte.
pub const UPSTREAM_CALL_TIMEOUT: Duration = Duration::from_secs(1);

/// Outbound JSON-RPC request body.
#[derive(Debug, Clone, Serialize)]
struct UpstreamRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: Vec<Value>,
}

impl<'a> UpstreamRequest<'a> {
    fn new(method: &'a str) -> Self {
        Self {
            jsonrpc: "2.0",
            method,
            params: Vec::new(),
        }
    }
}

/// reqwest-backed `UpstreamSigner`.
///
/// One client is built up front and shared, so connections to the signer are
/// pooled across requests.
#[derive(Debug, Clone)]
pub struct HttpSignerClient {
    /// Endpoint every query is POSTed to.
    uri: String,
    client: reqwest::Client,
}

impl HttpSignerClient {
    /// Create a client for the signer at `uri` with the default per-call timeout.
    pub fn new(uri: &str) -> Result<Self, SigilError> {
        Self::with_timeout(uri, UPSTREAM_CALL_TIMEOUT)
    }

    /// Create a client with a custom per-call timeout.
    pub fn with_timeout(uri: &str, timeout: Duration) -> Result<Self, SigilError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SigilError::Upstream(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            uri: uri.to_string(),
            client,
        })
    }
}

#[async_trait]
impl UpstreamSigner for HttpSignerClient {
    async fn call(&self, method: SignerMethod) -> Result<Value, SigilError> {
        let request = UpstreamRequest::new(method.rpc_method());

        let response = self
            .client
            .post(&self.uri)
            .json(&request)
            .send()
            .await
            .map_err(|e| SigilError::Upstream(format!("{} request failed: {}", method, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SigilError::Upstream(format!(
                "{} failed ({}): {}",
                method, status, body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SigilError::Upstream(format!("{} returned malformed JSON: {}", method, e)))?;

        match body {
            Value::Object(mut fields) => fields
                .remove("result")
                .ok_or_else(|| SigilError::Upstream(format!("{} response has no 'result'", method))),
            _ => Err(SigilError::Upstream(format!(
                "{} response is not a JSON object",
                method
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::sync::oneshot;

    /// Read one HTTP request (headers plus Content-Length body) off the stream.
    async fn read_request(stream: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).await.unwrap_or(0);
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Mock signer that answers one request with a fixed status and body and
    /// hands back the raw request it received.
    async fn mock_signer(status: u16, body: &str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let uri = format!("http://{}", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {} Mock\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let request = read_request(&mut stream).await;
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = tx.send(request);
            }
        });

        (uri, rx)
    }

    /// Mock signer that accepts a connection and never answers.
    async fn silent_signer() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let uri = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let _ = read_request(&mut stream).await;
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
        });
        uri
    }

    #[tokio::test]
    async fn call_posts_jsonrpc_envelope_and_returns_result() {
        let (uri, request_rx) = mock_signer(200, r#"{"jsonrpc":"2.0","id":1,"result":{"publicKey":"0x04ab"}}"#).await;
        let client = HttpSignerClient::new(&uri).unwrap();

        let result = client.call(SignerMethod::PublicKey).await.unwrap();
        assert_eq!(result, serde_json::json!({"publicKey": "0x04ab"}));

        let request = request_rx.await.unwrap();
        assert!(request.starts_with("POST / HTTP/1.1"));
        let body = &request[request.find("\r\n\r\n").unwrap() + 4..];
        let body: Value = serde_json::from_str(body).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"jsonrpc": "2.0", "method": "getPublicKey", "params": []})
        );
    }

    #[tokio::test]
    async fn error_status_is_upstream_error() {
        let (uri, _rx) = mock_signer(503, r#"{"error":"busy"}"#).await;
        let client = HttpSignerClient::new(&uri).unwrap();

        match client.call(SignerMethod::Address).await {
            Err(SigilError::Upstream(msg)) => assert!(msg.contains("503")),
            other => panic!("Expected Upstream error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn malformed_json_is_upstream_error() {
        let (uri, _rx) = mock_signer(200, "<html>not json</html>").await;
        let client = HttpSignerClient::new(&uri).unwrap();

        match client.call(SignerMethod::AttestationCertificate).await {
            Err(SigilError::Upstream(msg)) => assert!(msg.contains("malformed JSON")),
            other => panic!("Expected Upstream error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn missing_result_is_upstream_error() {
        let (uri, _rx) = mock_signer(200, r#"{"jsonrpc":"2.0","error":{"code":-1}}"#).await;
        let client = HttpSignerClient::new(&uri).unwrap();

        match client.call(SignerMethod::PublicKey).await {
            Err(SigilError::Upstream(msg)) => assert!(msg.contains("no 'result'")),
            other => panic!("Expected Upstream error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn connection_error_is_upstream_error() {
        let client = HttpSignerClient::new("http://127.0.0.1:1").unwrap(); // Nothing listening
        match client.call(SignerMethod::PublicKey).await {
            Err(SigilError::Upstream(msg)) => assert!(msg.contains("request failed")),
            other => panic!("Expected Upstream error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn unresponsive_signer_times_out() {
        let uri = silent_signer().await;
        let client = HttpSignerClient::with_timeout(&uri, Duration::from_millis(200)).unwrap();

        let start = std::time::Instant::now();
        let result = client.call(SignerMethod::Address).await;
        assert!(result.is_err());
        assert!(start.elapsed() < Duration::from_secs(2));
    }
}
