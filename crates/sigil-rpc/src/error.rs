// crates/sigil-rpc/src/error.rs
//
// Client-facing error taxonomy. The `Display` text of each variant is exactly
// the message returned to the caller.

use sigil_core::SigilError;
use thiserror::Error;

/// Errors a dispatched request can end in.
#[derive(Debug, Error)]
pub enum RpcError {
    /// The envelope named a method the gateway does not serve.
    #[error("bad method: \"{0}\"")]
    UnknownMethod(String),

    /// `getSignedEvent` was called without an event id.
    #[error("missing event id parameter, pass \"params = [event_id]\"")]
    MissingParameter,

    /// Any failure talking to the upstream signer.
    #[error("something went wrong")]
    UpstreamFailure(#[source] SigilError),

    /// Any other server-side failure (store I/O, corrupt record).
    #[error("something went wrong")]
    Internal(#[source] SigilError),
}

impl RpcError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            RpcError::UnknownMethod(_) | RpcError::MissingParameter => 400,
            RpcError::UpstreamFailure(_) | RpcError::Internal(_) => 500,
        }
    }

    /// Whether the error was caused by the request itself.
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}
