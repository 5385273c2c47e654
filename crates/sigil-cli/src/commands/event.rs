// crates/sigil-cli/src/commands/event.rs
//
// `sigil event <event_id>`: fetch a signed event by id.

use clap::Args;
use serde_json::Value;

use crate::output::format_json;
use crate::rpc_client::{rpc_call, RpcCallError};

/// Signed event lookup command.
#[derive(Debug, Args)]
pub struct EventCmd {
    /// The event id to look up.
    #[arg()]
    pub event_id: String,
}

/// Run the event command.
pub async fn run(endpoint: &str, cmd: &EventCmd) -> Result<(), RpcCallError> {
    let result = rpc_call(endpoint, "getSignedEvent", vec![Value::String(cmd.event_id.clone())]).await?;
    println!("{}", render(&cmd.event_id, &result));
    Ok(())
}

/// The gateway answers an unknown id with `{}`.
fn render(event_id: &str, result: &Value) -> String {
    match result.as_object() {
        Some(fields) if fields.is_empty() => format!("No signed event found for \"{}\"", event_id),
        _ => format_json(result),
    }
}
