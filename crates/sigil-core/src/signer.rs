// crates/sigil-core/src/signer.rs
//
// Signer identity types: the three upstream queries and their composite.

use serde::{Deserialize, Serialize};

/// One of the fixed, parameterless queries issued to the upstream signer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignerMethod {
    AttestationCertificate,
    PublicKey,
    Address,
}

impl SignerMethod {
    /// All queries, in the order they are issued.
    pub const ALL: [SignerMethod; 3] = [
        SignerMethod::AttestationCertificate,
        SignerMethod::PublicKey,
        SignerMethod::Address,
    ];

    /// The JSON-RPC method name sent upstream.
    pub fn rpc_method(&self) -> &'static str {
        match self {
            SignerMethod::AttestationCertificate => "getAttestationCertificate",
            SignerMethod::PublicKey => "getPublicKey",
            SignerMethod::Address => "getAddress",
        }
    }

    /// The member of the upstream `result` object holding the answer.
    pub fn result_field(&self) -> &'static str {
        match self {
            SignerMethod::AttestationCertificate => "attestationCertificate",
            SignerMethod::PublicKey => "publicKey",
            SignerMethod::Address => "address",
        }
    }
}

impl std::fmt::Display for SignerMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.rpc_method())
    }
}

/// Signer identity assembled from the three upstream queries. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignerDetails {
    pub attestation_certificate: String,
    pub public_key: String,
    pub address: String,
}
