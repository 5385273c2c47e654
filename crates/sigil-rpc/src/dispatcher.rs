// crates/sigil-rpc/src/dispatcher.rs
//
// Dispatcher: routes a request envelope to one of the two method handlers
// and normalizes the outcome into a response envelope.

use std::sync::Arc;

use sigil_core::traits::{SignedEventStore, UpstreamSigner};

use crate::envelope::{JsonRpcRequest, RpcResponse};
use crate::error::RpcError;
use crate::handlers;

/// The closed set of methods the gateway serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpcMethod {
    GetSignedEvent,
    GetSignerDetails,
    /// Anything else, carrying the name verbatim.
    Unknown(String),
}

impl RpcMethod {
    pub fn parse(name: &str) -> Self {
        match name {
            "getSignedEvent" => RpcMethod::GetSignedEvent,
            "getSignerDetails" => RpcMethod::GetSignerDetails,
            other => RpcMethod::Unknown(other.to_string()),
        }
    }
}

/// Stateless request router. Cheap to clone; safe to share across tasks.
#[derive(Clone)]
pub struct Dispatcher {
    /// Record store for getSignedEvent.
    store: Arc<dyn SignedEventStore>,
    /// Upstream signer for getSignerDetails.
    signer: Arc<dyn UpstreamSigner>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

impl Dispatcher {
    pub fn new(store: Arc<dyn SignedEventStore>, signer: Arc<dyn UpstreamSigner>) -> Self {
        Self { store, signer }
    }

    /// Dispatch a request to the handler named by its method.
    pub async fn dispatch(&self, request: JsonRpcRequest) -> RpcResponse {
        tracing::debug!(method = %request.method, params = request.params.len(), "Dispatching RPC request");

        let result = match RpcMethod::parse(&request.method) {
            RpcMethod::GetSignedEvent => {
                handlers::signed_event::handle_get_signed_event(self.store.as_ref(), &request.params)
                    .await
            }
            RpcMethod::GetSignerDetails => {
                handlers::signer::handle_get_signer_details(self.signer.as_ref()).await
            }
            RpcMethod::Unknown(name) => Err(RpcError::UnknownMethod(name)),
        };

        match result {
            Ok(value) => RpcResponse::success(value),
            Err(err) => {
                if err.is_client_error() {
                    tracing::warn!(method = %request.method, "Rejected RPC request: {}", err);
                }
                RpcResponse::from(err)
            }
        }
    }
}
