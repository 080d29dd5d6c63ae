// ============================================================================
// FetcherConfig — Locations and dev fee settings
// ============================================================================
// Default data dir: ~/Documents/MidnightFetcherBot
// Overrides: FETCHER_DATA_DIR, FETCHER_WALLET_PATH, FETCHER_DEVFEE_ENABLED,
//            FETCHER_DEVFEE_RATIO
// ============================================================================

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

/// Application folder under the user's Documents directory
pub const APP_DIR_NAME: &str = "MidnightFetcherBot";

/// Default dev fee ratio: one solution in every 24 goes to the pool
pub const DEFAULT_DEV_FEE_RATIO: u32 = 24;

/// Receipt log location relative to the data dir
pub const RECEIPTS_FILE: &str = "storage/receipts.jsonl";

/// Dev fee cache location relative to the data dir
pub const DEV_FEE_CACHE_FILE: &str = ".devfee_cache.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Root for receipts and dev fee cache
    pub data_dir: PathBuf,
    /// Explicit wallet file, bypassing legacy/profile probing
    pub wallet_path: Option<PathBuf>,
    pub dev_fee_enabled: bool,
    pub dev_fee_ratio: u32,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            wallet_path: None,
            dev_fee_enabled: true,
            dev_fee_ratio: DEFAULT_DEV_FEE_RATIO,
        }
    }
}

impl FetcherConfig {
    /// Defaults overridden by FETCHER_* environment variables.
    /// Unparsable values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("FETCHER_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(path) = std::env::var("FETCHER_WALLET_PATH") {
            config.wallet_path = Some(PathBuf::from(path));
        }
        if let Ok(raw) = std::env::var("FETCHER_DEVFEE_ENABLED") {
            match parse_bool(&raw) {
                Some(enabled) => config.dev_fee_enabled = enabled,
                None => warn!("[Config] Ignoring FETCHER_DEVFEE_ENABLED={}", raw),
            }
        }
        if let Ok(raw) = std::env::var("FETCHER_DEVFEE_RATIO") {
            match raw.trim().parse::<u32>() {
                Ok(ratio) if ratio > 0 => config.dev_fee_ratio = ratio,
                _ => warn!("[Config] Ignoring FETCHER_DEVFEE_RATIO={}", raw),
            }
        }

        config
    }

    pub fn receipts_path(&self) -> PathBuf {
        self.data_dir.join(RECEIPTS_FILE)
    }

    pub fn dev_fee_cache_path(&self) -> PathBuf {
        self.data_dir.join(DEV_FEE_CACHE_FILE)
    }
}

/// ~/Documents/MidnightFetcherBot, or ./MidnightFetcherBot without a home dir
pub fn default_data_dir() -> PathBuf {
    profile_root().join(APP_DIR_NAME)
}

/// ~/Documents, falling back to the working directory
pub(crate) fn profile_root() -> PathBuf {
    dirs::home_dir()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_hang_off_data_dir() {
        let config = FetcherConfig {
            data_dir: PathBuf::from("/tmp/fetcher"),
            ..Default::default()
        };
        assert_eq!(
            config.receipts_path(),
            PathBuf::from("/tmp/fetcher/storage/receipts.jsonl")
        );
        assert_eq!(
            config.dev_fee_cache_path(),
            PathBuf::from("/tmp/fetcher/.devfee_cache.json")
        );
    }

    #[test]
    fn test_defaults() {
        let config = FetcherConfig::default();
        assert!(config.dev_fee_enabled);
        assert_eq!(config.dev_fee_ratio, DEFAULT_DEV_FEE_RATIO);
        assert!(config.data_dir.ends_with(APP_DIR_NAME));
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" off "), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    // Only test in the crate touching FETCHER_* variables
    #[test]
    fn test_from_env_overrides() {
        const VARS: [&str; 4] = [
            "FETCHER_DATA_DIR",
            "FETCHER_WALLET_PATH",
            "FETCHER_DEVFEE_ENABLED",
            "FETCHER_DEVFEE_RATIO",
        ];
        let clear = || VARS.iter().for_each(|var| std::env::remove_var(var));

        clear();
        std::env::set_var("FETCHER_DATA_DIR", "/srv/fetcher");
        std::env::set_var("FETCHER_WALLET_PATH", "/srv/fetcher/secure/.wallet");
        std::env::set_var("FETCHER_DEVFEE_ENABLED", "off");
        std::env::set_var("FETCHER_DEVFEE_RATIO", "17");

        let config = FetcherConfig::from_env();
        assert_eq!(config.data_dir, PathBuf::from("/srv/fetcher"));
        assert_eq!(
            config.wallet_path,
            Some(PathBuf::from("/srv/fetcher/secure/.wallet"))
        );
        assert!(!config.dev_fee_enabled);
        assert_eq!(config.dev_fee_ratio, 17);

        // Bad values leave the defaults in place
        std::env::set_var("FETCHER_DEVFEE_ENABLED", "maybe");
        std::env::set_var("FETCHER_DEVFEE_RATIO", "0");
        let config = FetcherConfig::from_env();
        assert!(config.dev_fee_enabled);
        assert_eq!(config.dev_fee_ratio, DEFAULT_DEV_FEE_RATIO);

        std::env::set_var("FETCHER_DEVFEE_RATIO", "one in twenty");
        assert_eq!(FetcherConfig::from_env().dev_fee_ratio, DEFAULT_DEV_FEE_RATIO);

        clear();
        let config = FetcherConfig::from_env();
        assert_eq!(config.data_dir, default_data_dir());
        assert_eq!(config.wallet_path, None);
        assert!(config.dev_fee_enabled);
    }
}
