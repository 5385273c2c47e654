// crates/sigil-cli/src/commands/signer.rs
//
// `sigil signer`: show the upstream signer's certificate, public key and address.

use sigil_core::SignerDetails;

use crate::output::{format_json, format_table, signer_rows, OutputFormat};
use crate::rpc_client::{rpc_call, RpcCallError};

/// Run the signer command.
pub async fn run(endpoint: &str, format: OutputFormat) -> Result<(), RpcCallError> {
    let result = rpc_call(endpoint, "getSignerDetails", Vec::new()).await?;
    let details: SignerDetails = serde_json::from_value(result.clone())
        .map_err(|_| RpcCallError::UnexpectedBody(result.to_string()))?;

    match format {
        OutputFormat::Json => println!("{}", format_json(&details)),
        OutputFormat::Table => println!("{}", format_table(&signer_rows(&details))),
    }
    Ok(())
}
