// crates/sigil-cli/src/output.rs
//
// Output formatting utilities for the Sigil CLI.
// Supports table and JSON output modes.

use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use sigil_core::SignerDetails;

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed table output (default).
    Table,
    /// JSON output for machine consumption.
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        }
    }
}

/// One field/value row of a details table.
#[derive(Debug, Clone, Tabled)]
pub struct FieldRow {
    #[tabled(rename = "Field")]
    pub field: &'static str,
    #[tabled(rename = "Value")]
    pub value: String,
}

/// Format a slice of Tabled items as a table string.
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    Table::new(data).with(Style::rounded()).to_string()
}

/// Format a serializable value as a pretty-printed JSON string.
pub fn format_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|e| format!("JSON serialization error: {}", e))
}

/// Rows for the signer details table.
pub fn signer_rows(details: &SignerDetails) -> Vec<FieldRow> {
    vec![
        FieldRow {
            field: "Attestation certificate",
            value: details.attestation_certificate.clone(),
        },
        FieldRow {
            field: "Public key",
            value: details.public_key.clone(),
        },
        FieldRow {
            field: "Address",
            value: details.address.clone(),
        },
    ]
}
