// crates/sigil-rpc/src/lib.rs
//
// sigil-rpc: JSON-RPC-over-HTTP gateway for signed events and signer details.
//
// Provides the method dispatcher, the two method handlers, an HTTP client for
// the upstream signing service, request logging middleware, and the axum
// server that exposes everything on a single POST endpoint.

pub mod dispatcher;
pub mod envelope;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod server;
pub mod upstream;

// Re-export the main types for ergonomic access.
pub use dispatcher::{Dispatcher, RpcMethod};
pub use envelope::{JsonRpcRequest, RpcResponse};
pub use error::RpcError;
pub use server::{RpcConfig, SigilRpcServer};
pub use upstream::{HttpSignerClient, UPSTREAM_CALL_TIMEOUT};
