//! ============================================================================
//! Wallet Module - Address universe derived from the wallet file
//! ============================================================================
//! The wallet manager persists every derived address (index, bech32, last
//! known registration flag). This module only reads it back.
//!
//! ## Locations
//! - **Legacy**: `<cwd>/secure/.wallet`
//! - **Profile**: `~/Documents/MidnightFetcherBot/secure/.wallet`
//!
//! The legacy file wins when both exist.
//! ============================================================================

mod source;

pub use source::{FileWalletSource, WalletFile, WALLET_FILE_NAME};

use crate::types::{SourceError, WalletAddress};

/// Read side of the wallet
pub trait WalletSource: Send + Sync {
    /// Every address the wallet has generated, in file order.
    /// `Unavailable` when there is no wallet, `Corrupt` when it can't be parsed.
    fn load_addresses(&self) -> Result<Vec<WalletAddress>, SourceError>;
}
