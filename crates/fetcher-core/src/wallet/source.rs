//! ============================================================================
//! File Wallet Source - Locates and parses the `.wallet` file
//! ============================================================================

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::WalletSource;
use crate::config::{profile_root, APP_DIR_NAME};
use crate::types::{null_as_default, SourceError, WalletAddress};

pub const WALLET_FILE_NAME: &str = ".wallet";

/// The parts of the wallet file this crate cares about.
/// Key material and other fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalletFile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub addresses: Vec<WalletAddress>,
}

/// Wallet file on disk, probed at the legacy location then the profile location
pub struct FileWalletSource {
    legacy_path: PathBuf,
    profile_path: PathBuf,
    override_path: Option<PathBuf>,
}

impl FileWalletSource {
    /// Probe the standard legacy and profile locations
    pub fn new() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::with_locations(
            cwd.join("secure").join(WALLET_FILE_NAME),
            profile_root().join(APP_DIR_NAME).join("secure").join(WALLET_FILE_NAME),
        )
    }

    pub fn with_locations(legacy_path: PathBuf, profile_path: PathBuf) -> Self {
        Self {
            legacy_path,
            profile_path,
            override_path: None,
        }
    }

    /// Use exactly this file, skipping the probe
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        let mut source = Self::new();
        source.override_path = Some(path.into());
        source
    }

    /// Legacy location if it exists, otherwise the profile location
    pub fn resolve_path(&self) -> PathBuf {
        if let Some(path) = &self.override_path {
            return path.clone();
        }
        if self.legacy_path.exists() {
            self.legacy_path.clone()
        } else {
            self.profile_path.clone()
        }
    }

    /// Parse a wallet file
    pub fn load(path: &Path) -> Result<WalletFile, SourceError> {
        if !path.exists() {
            return Err(SourceError::Unavailable);
        }

        let content = fs::read_to_string(path).map_err(|e| {
            SourceError::Corrupt(format!("Failed to read {}: {}", path.display(), e))
        })?;

        serde_json::from_str::<WalletFile>(&content)
            .map_err(|e| SourceError::Corrupt(format!("Failed to parse {}: {}", path.display(), e)))
    }
}

impl Default for FileWalletSource {
    fn default() -> Self {
        Self::new()
    }
}

impl WalletSource for FileWalletSource {
    fn load_addresses(&self) -> Result<Vec<WalletAddress>, SourceError> {
        let path = self.resolve_path();
        debug!("Loading wallet from: {}", path.display());

        let wallet = Self::load(&path)?;
        info!("Loaded {} wallet addresses", wallet.addresses.len());
        Ok(wallet.addresses)
    }
}
