// crates/sigil-rpc/src/handlers/signer.rs
//
// getSignerDetails: proxy three parameterless queries to the upstream signer
// and compose their answers.
//
// The queries run in order. The first failure aborts the rest and the caller
// only ever sees the generic 500; the cause is logged here.

use serde_json::Value;

use sigil_core::error::SigilError;
use sigil_core::signer::{SignerDetails, SignerMethod};
use sigil_core::traits::UpstreamSigner;

use crate::error::RpcError;
use crate::upstream::UPSTREAM_CALL_TIMEOUT;

/// Handle a getSignerDetails request. Params are ignored.
pub async fn handle_get_signer_details(signer: &dyn UpstreamSigner) -> Result<Value, RpcError> {
    let details = fetch_signer_details(signer).await.map_err(|e| {
        tracing::error!("Failed to fetch signer details: {}", e);
        RpcError::UpstreamFailure(e)
    })?;

    serde_json::to_value(details).map_err(|e| RpcError::Internal(e.into()))
}

/// Query the certificate, public key and address in sequence.
pub async fn fetch_signer_details(signer: &dyn UpstreamSigner) -> Result<SignerDetails, SigilError> {
    let attestation_certificate = query_field(signer, SignerMethod::AttestationCertificate).await?;
    let public_key = query_field(signer, SignerMethod::PublicKey).await?;
    let address = query_field(signer, SignerMethod::Address).await?;

    Ok(SignerDetails {
        attestation_certificate,
        public_key,
        address,
    })
}

/// Issue one query under its own timeout and pull the expected string field.
async fn query_field(signer: &dyn UpstreamSigner, method: SignerMethod) -> Result<String, SigilError> {
    let result = tokio::time::timeout(UPSTREAM_CALL_TIMEOUT, signer.call(method))
        .await
        .map_err(|_| {
            SigilError::Upstream(format!(
                "{} timed out after {}ms",
                method,
                UPSTREAM_CALL_TIMEOUT.as_millis()
            ))
        })??;

    result
        .get(method.result_field())
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            SigilError::Upstream(format!(
                "{} response missing string '{}' field",
                method,
                method.result_field()
            ))
        })
}
