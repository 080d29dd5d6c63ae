//! ============================================================================
//! Ledger Service - Query boundary for the dashboard (Async-First)
//! ============================================================================
//! Source reads run on tokio's blocking pool so pollers never stall the
//! runtime. Every query returns a payload: faults become `success = false`
//! with zeroed counts and empty collections.
//!
//! Pattern: Clone Arc -> spawn_blocking -> JoinHandle -> await result
//! ============================================================================

use std::sync::Arc;
use tracing::{debug, error, info};

use crate::config::FetcherConfig;
use crate::devfee::{DevFeeManager, DevFeeSnapshot};
use crate::orchestrator::Orchestrator;
use crate::receipts::{JsonlReceiptStore, ReceiptStore};
use crate::reconcile::reconcile_sources;
use crate::types::{AddressesResponse, SourceError};
use crate::wallet::{FileWalletSource, WalletSource};

/// Read-only query service over injected sources
#[derive(Clone)]
pub struct LedgerService {
    receipts: Arc<dyn ReceiptStore>,
    wallet: Arc<dyn WalletSource>,
    orchestrator: Arc<dyn Orchestrator>,
    dev_fee: Arc<DevFeeManager>,
}

impl LedgerService {
    pub fn new(
        receipts: Arc<dyn ReceiptStore>,
        wallet: Arc<dyn WalletSource>,
        orchestrator: Arc<dyn Orchestrator>,
        dev_fee: Arc<DevFeeManager>,
    ) -> Self {
        Self {
            receipts,
            wallet,
            orchestrator,
            dev_fee,
        }
    }

    /// File-backed receipts, wallet and dev fee cache from `config`
    pub fn from_config(config: &FetcherConfig, orchestrator: Arc<dyn Orchestrator>) -> Self {
        let wallet = match &config.wallet_path {
            Some(path) => FileWalletSource::at_path(path),
            None => FileWalletSource::new(),
        };

        let receipts = JsonlReceiptStore::new(config.receipts_path());
        info!("Ledger data dir: {}", config.data_dir.display());
        debug!("Receipt log: {}", receipts.path().display());

        Self::new(
            Arc::new(receipts),
            Arc::new(wallet),
            orchestrator,
            Arc::new(DevFeeManager::from_config(config)),
        )
    }

    /// Per-address registration and challenge status.
    /// `include_all` reports every known address instead of only those with receipts.
    pub async fn get_reconciled_addresses(&self, include_all: bool) -> AddressesResponse {
        debug!("[Query] addresses (include_all: {})", include_all);

        // Clone Arcs for the blocking task
        let receipts = Arc::clone(&self.receipts);
        let wallet = Arc::clone(&self.wallet);
        let orchestrator = Arc::clone(&self.orchestrator);

        let handle = tokio::task::spawn_blocking(move || {
            let receipts = receipts.read_receipts();
            let snapshot = orchestrator.addresses_data();
            let wallet_addresses = if include_all {
                wallet.load_addresses()
            } else {
                Err(SourceError::Unavailable)
            };
            reconcile_sources(&receipts, wallet_addresses, snapshot.as_ref(), include_all)
        });

        match handle.await {
            Ok(result) => AddressesResponse {
                success: true,
                current_challenge: result.current_challenge,
                addresses: result.addresses,
                summary: result.summary,
                error: None,
            },
            Err(e) => {
                error!("[Query] Addresses error: {}", e);
                AddressesResponse::failed(format!("Failed to fetch address data: {}", e))
            }
        }
    }

    /// Last persisted dev fee cache and derived stats
    pub async fn get_dev_fee_snapshot(&self) -> DevFeeSnapshot {
        debug!("[Query] dev fee snapshot");

        let dev_fee = Arc::clone(&self.dev_fee);
        let handle = tokio::task::spawn_blocking(move || dev_fee.snapshot());

        match handle.await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!("[Query] Dev fee cache error: {}", e);
                DevFeeSnapshot::failed(format!("Task failed: {}", e))
            }
        }
    }
}
