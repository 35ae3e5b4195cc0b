//! Veil API server entry point.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use veil_api::{AppState, Server, seed};
use veil_core::VeilConfig;
use veil_storage::MemoryStore;

/// Veil - read-only object API with field-level redaction
#[derive(Parser, Debug)]
#[command(name = "veil-server")]
#[command(about = "Serve stored objects with ACL checks and PII redaction", long_about = None)]
struct Args {
    /// Configuration file path (falls back to $VEIL_CONFIG)
    #[arg(short, long)]
    config: Option<String>,

    /// Override the bind address from the configuration
    #[arg(short, long)]
    bind: Option<String>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Seed the in-memory store with the PII demo scenario
    #[arg(long)]
    seed_demo: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = VeilConfig::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }

    if args.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.clone().into()),
        )
        .init();

    tracing::info!(
        application_id = %config.server.application_id,
        master_key = config.server.master_key.is_some(),
        sensitive_fields = ?config.sensitive_fields(),
        "Veil server starting"
    );

    let store = Arc::new(MemoryStore::new());
    if args.seed_demo {
        seed::seed_demo(&store).await?;
    }

    let state = AppState::from_store(store, &config);
    Server::new(config.server.bind.clone(), state).run().await?;
    Ok(())
}
