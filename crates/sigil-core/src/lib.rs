// crates/sigil-core/src/lib.rs
//
// sigil-core: Core types, error taxonomy, and collaborator traits for the
// Sigil signed-event gateway.
//
// This is the leaf crate that all other crates in the workspace depend on.
// It defines the signed-event record, the signer identity types, and the
// store / upstream-signer trait seams the RPC layer is built against.

pub mod error;
pub mod event;
pub mod signer;
pub mod traits;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use sigil_core::SignedEventRecord;`

pub use error::SigilError;
pub use event::{SignedEventRecord, EVENT_ID_FIELD, INTERNAL_ID_FIELD};
pub use signer::{SignerDetails, SignerMethod};
pub use traits::{SignedEventStore, UpstreamSigner};
