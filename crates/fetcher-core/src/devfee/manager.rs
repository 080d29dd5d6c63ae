//! ============================================================================
//! Dev Fee Manager - Read-through accessor for the persisted fee cache
//! ============================================================================
//! Reads whatever the pool fetcher last wrote. Never refreshes the pool and
//! never fails to its caller: read errors become defaulted values.
//! ============================================================================

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::types::{DevFeeCache, DevFeeSnapshot, DevFeeStats};
use crate::config::FetcherConfig;
use crate::types::FetcherError;

pub struct DevFeeManager {
    cache_path: PathBuf,
    enabled: bool,
    ratio: u32,
}

impl DevFeeManager {
    pub fn new(cache_path: impl Into<PathBuf>, enabled: bool, ratio: u32) -> Self {
        Self {
            cache_path: cache_path.into(),
            enabled,
            ratio,
        }
    }

    pub fn from_config(config: &FetcherConfig) -> Self {
        Self::new(config.dev_fee_cache_path(), config.dev_fee_enabled, config.dev_fee_ratio)
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    /// Load the cache file. A missing file is an empty cache, not an error.
    pub fn try_load(&self) -> Result<DevFeeCache, FetcherError> {
        if !self.cache_path.exists() {
            debug!("No dev fee cache at {}", self.cache_path.display());
            return Ok(DevFeeCache::default());
        }

        let content = fs::read_to_string(&self.cache_path)?;
        serde_json::from_str::<DevFeeCache>(&content).map_err(|e| {
            FetcherError::SourceCorrupt(format!("{}: {}", self.cache_path.display(), e))
        })
    }

    /// Last persisted cache; on read failure an empty cache with `last_fetch_error` set
    pub fn get_cache(&self) -> DevFeeCache {
        self.try_load().unwrap_or_else(|e| {
            warn!("[DevFee] Failed to read cache: {}", e);
            DevFeeCache::unreadable(e.to_string())
        })
    }

    pub fn get_address_pool(&self) -> Vec<String> {
        self.get_cache().address_pool
    }

    pub fn get_stats(&self) -> DevFeeStats {
        match self.try_load() {
            Ok(cache) => self.stats_for(&cache),
            Err(_) => DevFeeStats::default(),
        }
    }

    /// Cache and stats from a single read of the file
    pub fn snapshot(&self) -> DevFeeSnapshot {
        match self.try_load() {
            Ok(cache) => DevFeeSnapshot {
                success: true,
                stats: self.stats_for(&cache),
                cache,
                error: None,
            },
            Err(e) => {
                warn!("[DevFee] Failed to read cache: {}", e);
                DevFeeSnapshot::failed(e.to_string())
            }
        }
    }

    /// Dev fee only runs with a configured ratio and a non-empty pool
    fn stats_for(&self, cache: &DevFeeCache) -> DevFeeStats {
        DevFeeStats {
            enabled: self.enabled && !cache.address_pool.is_empty(),
            ratio: self.ratio,
            address_pool_size: cache.address_pool.len(),
            total_dev_fee_solutions: cache.total_dev_fee_solutions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_DEV_FEE_RATIO;
    use serde_json::json;

    fn manager_in(dir: &Path) -> DevFeeManager {
        DevFeeManager::new(dir.join(".devfee_cache.json"), true, DEFAULT_DEV_FEE_RATIO)
    }

    #[test]
    fn test_missing_cache_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager_in(dir.path());

        let snapshot = manager.snapshot();
        assert!(snapshot.success);
        assert!(snapshot.cache.address_pool.is_empty());
        assert_eq!(snapshot.cache.total_dev_fee_solutions, 0);
        assert_eq!(
            snapshot.stats,
            DevFeeStats {
                enabled: false,
                ratio: 24,
                address_pool_size: 0,
                total_dev_fee_solutions: 0,
            }
        );
    }

    #[test]
    fn test_reads_persisted_cache() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager_in(dir.path());
        let body = json!({
            "addressPool": ["fee1", "fee2", "fee3"],
            "totalDevFeeSolutions": 7,
            "poolFetchedAt": 1762077600000i64,
            "clientId": "client-abc"
        });
        fs::write(manager.cache_path(), body.to_string()).unwrap();

        assert_eq!(manager.get_address_pool(), vec!["fee1", "fee2", "fee3"]);
        let cache = manager.get_cache();
        assert_eq!(cache.client_id.as_deref(), Some("client-abc"));
        assert_eq!(cache.last_fetch_error, None);

        let stats = manager.get_stats();
        assert!(stats.enabled);
        assert_eq!(stats.address_pool_size, 3);
        assert_eq!(stats.total_dev_fee_solutions, 7);
    }

    #[test]
    fn test_disabled_by_config() {
        let dir = tempfile::tempdir().unwrap();
        let manager = DevFeeManager::new(dir.path().join(".devfee_cache.json"), false, 10);
        fs::write(manager.cache_path(), r#"{"addressPool":["fee1"]}"#).unwrap();

        let stats = manager.get_stats();
        assert!(!stats.enabled);
        assert_eq!(stats.ratio, 10);
    }

    #[test]
    fn test_corrupt_cache_never_fails() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager_in(dir.path());
        fs::write(manager.cache_path(), "{{{{").unwrap();

        let cache = manager.get_cache();
        assert!(cache.address_pool.is_empty());
        assert!(cache.last_fetch_error.is_some());
        assert_eq!(manager.get_stats(), DevFeeStats::default());

        let snapshot = manager.snapshot();
        assert!(!snapshot.success);
        assert!(snapshot.error.is_some());
        assert!(snapshot.cache.last_fetch_error.is_some());
        assert_eq!(snapshot.stats.ratio, 24);
    }
}
