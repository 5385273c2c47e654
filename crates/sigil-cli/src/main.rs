// crates/sigil-cli/src/main.rs
//
// CLI entrypoint for the Sigil developer tools.
//
// Provides subcommands for fetching signed events and the upstream signer's
// identity through a running sigil-daemon.

mod commands;
mod output;
mod rpc_client;

use clap::{Parser, Subcommand};
use commands::event::EventCmd;
use output::OutputFormat;

/// Sigil CLI: query a Sigil gateway.
#[derive(Parser, Debug)]
#[command(name = "sigil", version, about = "Sigil CLI for signed events and signer details")]
struct Cli {
    /// RPC endpoint of the sigil-daemon.
    #[arg(long, global = true, default_value = "http://127.0.0.1:3030")]
    rpc: String,

    /// Print JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch a signed event by id.
    Event(EventCmd),

    /// Show the signer's attestation certificate, public key and address.
    Signer,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Event(cmd) => commands::event::run(&cli.rpc, cmd).await,
        Commands::Signer => {
            commands::signer::run(&cli.rpc, OutputFormat::from_json_flag(cli.json)).await
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
