// crates/sigil-rpc/src/handlers/mod.rs
//
// Handler modules for the two RPC methods.

pub mod signed_event;
pub mod signer;
