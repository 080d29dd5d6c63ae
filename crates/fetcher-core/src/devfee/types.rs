//! ============================================================================
//! Dev Fee Types - Persisted cache and derived stats
//! ============================================================================

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_DEV_FEE_RATIO;

/// Contents of `.devfee_cache.json`, as last written by the pool fetcher
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DevFeeCache {
    #[serde(default)]
    pub address_pool: Vec<String>,
    #[serde(default)]
    pub total_dev_fee_solutions: u64,
    /// Unix millis of the last successful pool fetch
    #[serde(default)]
    pub pool_fetched_at: Option<i64>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub last_fetch_error: Option<String>,
}

impl DevFeeCache {
    /// Empty cache carrying the reason it couldn't be read
    pub fn unreadable(error: impl Into<String>) -> Self {
        Self {
            last_fetch_error: Some(error.into()),
            ..Default::default()
        }
    }
}

/// Summary shown next to the address table
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DevFeeStats {
    pub enabled: bool,
    pub ratio: u32,
    pub address_pool_size: usize,
    pub total_dev_fee_solutions: u64,
}

impl Default for DevFeeStats {
    fn default() -> Self {
        Self {
            enabled: false,
            ratio: DEFAULT_DEV_FEE_RATIO,
            address_pool_size: 0,
            total_dev_fee_solutions: 0,
        }
    }
}

/// Payload returned by the dev fee query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DevFeeSnapshot {
    pub success: bool,
    pub cache: DevFeeCache,
    pub stats: DevFeeStats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DevFeeSnapshot {
    /// Defaulted payload when the cache couldn't be read
    pub fn failed(cause: impl Into<String>) -> Self {
        Self {
            success: false,
            cache: DevFeeCache::unreadable(cause),
            stats: DevFeeStats::default(),
            error: Some("Failed to read dev fee cache".to_string()),
        }
    }
}
