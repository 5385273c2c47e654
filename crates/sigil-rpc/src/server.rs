// crates/sigil-rpc/src/server.rs
//
// RPC server setup: SigilRpcServer and RpcConfig.
//
// A single `POST /` route accepts a JSON envelope, hands it to the
// Dispatcher, and renders the outcome: `{"result": ...}` as JSON with 200,
// failures as plain text with their own status code.

use std::future::Future;
use std::net::SocketAddr;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use bytes::Bytes;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use crate::dispatcher::Dispatcher;
use crate::envelope::{JsonRpcRequest, RpcResponse};
use crate::middleware;

// ---------------------------------------------------------------------------
// RpcConfig
// ---------------------------------------------------------------------------

/// Configuration for the RPC server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    /// Host to bind to (e.g., "127.0.0.1" or "0.0.0.0").
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3030,
        }
    }
}

// ---------------------------------------------------------------------------
// SigilRpcServer
// ---------------------------------------------------------------------------

/// The HTTP front of the gateway.
#[derive(Debug, Clone)]
pub struct SigilRpcServer {
    config: RpcConfig,
    dispatcher: Dispatcher,
}

impl SigilRpcServer {
    pub fn new(config: RpcConfig, dispatcher: Dispatcher) -> Self {
        Self { config, dispatcher }
    }

    /// Build the axum router. Exposed so tests can drive it without a socket.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", post(handle_rpc))
            .layer(axum::middleware::from_fn(middleware::log_requests))
            .with_state(self.dispatcher.clone())
    }

    /// Bind the configured address.
    pub async fn bind(&self) -> std::io::Result<TcpListener> {
        TcpListener::bind((self.config.host.as_str(), self.config.port)).await
    }

    /// Bind the configured address and serve until `shutdown` resolves.
    /// In-flight requests are allowed to finish.
    pub async fn start<F>(&self, shutdown: F) -> Result<(), Box<dyn std::error::Error>>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = self.bind().await?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already-bound listener until `shutdown` resolves.
    pub async fn serve<F>(
        &self,
        listener: TcpListener,
        shutdown: F,
    ) -> Result<(), Box<dyn std::error::Error>>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = listener.local_addr()?;
        tracing::info!("Sigil RPC server listening on {}", addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Sigil RPC server stopped");
        Ok(())
    }
}

/// `POST /`: decode the envelope, dispatch, render.
async fn handle_rpc(State(dispatcher): State<Dispatcher>, body: Bytes) -> Response {
    let request: JsonRpcRequest = match serde_json::from_slice(&body) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!("Invalid RPC request body: {}", e);
            return (StatusCode::BAD_REQUEST, format!("bad request: {}", e)).into_response();
        }
    };

    build_response(dispatcher.dispatch(request).await)
}

/// Render a response envelope as an HTTP response.
fn build_response(response: RpcResponse) -> Response {
    match response {
        RpcResponse::Success { .. } => (StatusCode::OK, Json(response)).into_response(),
        RpcResponse::Failure {
            message,
            status_code,
        } => {
            let status =
                StatusCode::from_u16(status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, message).into_response()
        }
    }
}
