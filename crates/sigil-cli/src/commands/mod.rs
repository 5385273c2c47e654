// crates/sigil-cli/src/commands/mod.rs
//
// Command module declarations for the Sigil CLI.

pub mod event;
pub mod signer;
