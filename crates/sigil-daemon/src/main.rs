// crates/sigil-daemon/src/main.rs
//
// Binary entrypoint for the Sigil gateway daemon.
//
// Parses CLI arguments, resolves configuration, initializes tracing, opens
// the record store, builds the upstream signer client, optionally imports
// records, and serves the RPC endpoint until Ctrl-C / SIGTERM.

mod config;
mod import;

use std::sync::Arc;

use clap::Parser;
use config::DaemonConfig;

use sigil_core::traits::SignedEventStore;
use sigil_rpc::{Dispatcher, HttpSignerClient, SigilRpcServer};
use sigil_store::{InMemoryEventStore, RocksEventStore};

/// Sigil daemon: serves signed events and signer details over JSON-RPC.
#[derive(Parser, Debug)]
#[command(name = "sigil-daemon", version, about = "Sigil signed-event gateway daemon")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "~/.sigil/config.toml")]
    config: String,

    /// JSON file with an array of signed events to import before serving.
    #[arg(long)]
    import: Option<String>,

    /// Keep records in memory instead of RocksDB (nothing survives a restart).
    #[arg(long)]
    ephemeral: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Resolve configuration before tracing so the configured level applies;
    // the outcome is logged once the subscriber is up. A missing file means
    // defaults; an unreadable or malformed one is fatal.
    let config_path = config::expand_tilde(&args.config);
    let (mut daemon_config, found) = DaemonConfig::resolve(&config_path)?;
    daemon_config.apply_env()?;

    // Initialize tracing subscriber for structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&daemon_config.log_level)),
        )
        .init();

    if found {
        tracing::info!("Loaded configuration from {}", config_path);
    } else {
        tracing::warn!("No config file at {}. Using defaults.", config_path);
    }

    tracing::info!("Sigil daemon v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "RPC endpoint: {}:{}",
        daemon_config.rpc_host,
        daemon_config.rpc_port
    );
    tracing::info!("Upstream signer: {}", daemon_config.signer_uri);

    let store: Arc<dyn SignedEventStore> = if args.ephemeral {
        tracing::warn!("Running with an in-memory record store. Records are lost on exit.");
        Arc::new(InMemoryEventStore::new())
    } else {
        let descriptor = daemon_config.store_descriptor();
        let store = RocksEventStore::open(&descriptor)?;
        tracing::info!(
            "Record store opened at {} (collection: {})",
            descriptor.database_path().display(),
            descriptor.collection
        );
        Arc::new(store)
    };

    if let Some(path) = &args.import {
        import::import_events(store.as_ref(), path).await?;
    }

    let signer = Arc::new(HttpSignerClient::new(&daemon_config.signer_uri)?);
    let dispatcher = Dispatcher::new(store, signer);
    let server = SigilRpcServer::new(daemon_config.rpc_config(), dispatcher);

    server.start(shutdown_signal()).await?;

    tracing::info!("Sigil daemon shut down gracefully");
    Ok(())
}

/// Resolve on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("Shutdown signal received");
}
