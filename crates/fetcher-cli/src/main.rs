// ============================================================================
// fetcher-status — CLI inspection tool for the Midnight Fetcher address ledger
// ============================================================================
// Usage:
//   fetcher-status addresses [--include-all]   Per-address registration/solutions
//   fetcher-status devfee                      Cached dev fee pool and stats
//   fetcher-status export                      Both payloads as one JSON document
// ============================================================================

use anyhow::Result;
use chrono::{TimeZone, Utc};
use clap::{Parser, Subcommand};
use fetcher_core::{
    AddressesResponse, DevFeeSnapshot, FetcherConfig, LedgerService, NoSession, Orchestrator,
    SnapshotFileOrchestrator,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Midnight Fetcher address ledger inspection tool
#[derive(Parser)]
#[command(
    name = "fetcher-status",
    version,
    about = "Inspect mining addresses, receipts and dev fee cache"
)]
struct Cli {
    /// Data directory holding storage/receipts.jsonl and .devfee_cache.json
    /// (default: ~/Documents/MidnightFetcherBot)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Wallet file to read instead of probing the legacy and profile locations
    #[arg(long, global = true)]
    wallet_path: Option<PathBuf>,

    /// Session snapshot exported by a running miner
    #[arg(long, global = true)]
    orchestrator_snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show per-address registration, current challenge and solution counts
    Addresses {
        /// Report every wallet address, not only those with receipts
        #[arg(long)]
        include_all: bool,

        /// Print the raw JSON payload
        #[arg(long)]
        json: bool,
    },

    /// Show the cached dev fee pool and stats
    Devfee {
        /// Print the raw JSON payload
        #[arg(long)]
        json: bool,
    },

    /// Export addresses (include-all) and dev fee payloads as JSON
    Export,
}

fn format_millis(ms: i64) -> String {
    Utc.timestamp_millis_opt(ms)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| format!("(invalid: {})", ms))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fetcher_core=info".parse()?)
                .add_directive("fetcher_status=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let mut config = FetcherConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(path) = cli.wallet_path {
        config.wallet_path = Some(path);
    }

    let orchestrator: Arc<dyn Orchestrator> = match cli.orchestrator_snapshot {
        Some(path) => {
            let snapshot = SnapshotFileOrchestrator::new(path);
            info!("Using session snapshot: {}", snapshot.path().display());
            Arc::new(snapshot)
        }
        None => Arc::new(NoSession),
    };

    let service = LedgerService::from_config(&config, orchestrator);

    match cli.command {
        Commands::Addresses { include_all, json } => {
            cmd_addresses(&service, include_all, json).await
        }
        Commands::Devfee { json } => cmd_devfee(&service, json).await,
        Commands::Export => cmd_export(&service).await,
    }
}

async fn cmd_addresses(service: &LedgerService, include_all: bool, json: bool) -> Result<()> {
    let resp = service.get_reconciled_addresses(include_all).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&resp)?);
        return Ok(());
    }

    print_addresses(&resp);
    Ok(())
}

fn print_addresses(resp: &AddressesResponse) {
    if !resp.success {
        println!("Query failed: {}", resp.error.as_deref().unwrap_or("unknown error"));
        return;
    }

    println!("=== Mining Addresses ===");
    println!(
        "Current challenge: {}",
        resp.current_challenge.as_deref().unwrap_or("- (mining not running)")
    );
    println!();

    if resp.addresses.is_empty() {
        println!("No addresses found.");
        return;
    }

    println!(
        "{:<6}  {:<64}  {:<10}  {:<8}  {}",
        "INDEX", "ADDRESS", "REGISTERED", "SOLVED", "SOLUTIONS"
    );
    println!("{}", "-".repeat(104));

    for addr in &resp.addresses {
        println!(
            "{:<6}  {:<64}  {:<10}  {:<8}  {}",
            addr.index,
            addr.bech32,
            if addr.registered { "yes" } else { "no" },
            if addr.solved_current_challenge { "yes" } else { "-" },
            addr.total_solutions
        );
    }

    println!(
        "\nTotal: {} addresses, {} registered, {} solved current challenge",
        resp.summary.total_addresses,
        resp.summary.registered_addresses,
        resp.summary.solved_current_challenge
    );
}

async fn cmd_devfee(service: &LedgerService, json: bool) -> Result<()> {
    let snapshot = service.get_dev_fee_snapshot().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    print_devfee(&snapshot);
    Ok(())
}

fn print_devfee(snapshot: &DevFeeSnapshot) {
    println!("=== Dev Fee ===");
    if let Some(err) = &snapshot.error {
        println!("Warning: {}", err);
    }
    println!("Enabled:    {}", snapshot.stats.enabled);
    println!("Ratio:      1 in {}", snapshot.stats.ratio);
    println!("Pool size:  {}", snapshot.stats.address_pool_size);
    println!("Solutions:  {}", snapshot.stats.total_dev_fee_solutions);
    println!(
        "Fetched at: {}",
        snapshot
            .cache
            .pool_fetched_at
            .map(format_millis)
            .unwrap_or_else(|| "N/A".into())
    );
    println!("Client ID:  {}", snapshot.cache.client_id.as_deref().unwrap_or("-"));
    if let Some(err) = &snapshot.cache.last_fetch_error {
        println!("Last error: {}", err);
    }

    for address in &snapshot.cache.address_pool {
        println!("  - {}", address);
    }
}

async fn cmd_export(service: &LedgerService) -> Result<()> {
    let addresses = service.get_reconciled_addresses(true).await;
    let devfee = service.get_dev_fee_snapshot().await;

    let export = serde_json::json!({
        "exported_at": Utc::now().to_rfc3339(),
        "addresses": addresses,
        "devfee": devfee,
    });

    println!("{}", serde_json::to_string_pretty(&export)?);
    Ok(())
}
