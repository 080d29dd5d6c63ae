//! ============================================================================
//! FETCHER-CORE: Address Ledger for the Midnight Fetcher miner
//! ============================================================================
//! This crate handles the bookkeeping behind the mining dashboard:
//! - Receipt log reading (accepted solutions, dev fee excluded from stats)
//! - Wallet address universe from the `.wallet` file
//! - Live session state from the mining orchestrator
//! - Reconciliation of all three into per-address status
//! - Read-only dev fee cache access
//! ============================================================================

pub mod config;
pub mod devfee;
pub mod orchestrator;
pub mod receipts;
pub mod reconcile;
pub mod service;
pub mod types;
pub mod wallet;

// Re-export main types for convenience
pub use types::*;
pub use config::FetcherConfig;
pub use devfee::{DevFeeCache, DevFeeManager, DevFeeSnapshot, DevFeeStats};
pub use orchestrator::{NoSession, Orchestrator, SessionOrchestrator, SnapshotFileOrchestrator};
pub use receipts::{JsonlReceiptStore, ReceiptStore};
pub use reconcile::{reconcile_sources, AddressUniverse, Reconciliation, SolutionTally};
pub use service::LedgerService;
pub use wallet::{FileWalletSource, WalletSource};
