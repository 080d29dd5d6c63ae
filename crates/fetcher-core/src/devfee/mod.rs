//! ============================================================================
//! Dev Fee Module - Read-only view of the developer fee configuration
//! ============================================================================
//! A fixed share of solutions (1 in `ratio`) is mined for addresses from a
//! remotely fetched pool. The fetcher persists that pool to
//! `.devfee_cache.json`; this module only reads it back.
//!
//! ## Usage
//! ```rust,ignore
//! use fetcher_core::devfee::DevFeeManager;
//!
//! let manager = DevFeeManager::from_config(&config);
//! let snapshot = manager.snapshot();
//! println!("{} pool addresses", snapshot.stats.address_pool_size);
//! ```
//! ============================================================================

mod manager;
mod types;

pub use manager::DevFeeManager;
pub use types::{DevFeeCache, DevFeeSnapshot, DevFeeStats};
