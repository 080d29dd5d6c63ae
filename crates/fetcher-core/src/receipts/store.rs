//! ============================================================================
//! JSONL Receipt Store - File-backed receipt log
//! ============================================================================
//! Default path: <data_dir>/storage/receipts.jsonl (one receipt per line)
//! ============================================================================

use anyhow::{anyhow, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::ReceiptStore;
use crate::types::Receipt;

/// Receipt log stored as newline-delimited JSON
pub struct JsonlReceiptStore {
    path: PathBuf,
}

impl JsonlReceiptStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the log file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a single receipt. Creates the log (and its directory) on first use.
    pub fn append_receipt(&self, receipt: &Receipt) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| anyhow!("Failed to create receipts directory: {}", e))?;
        }

        let line = serde_json::to_string(receipt)
            .map_err(|e| anyhow!("Failed to serialize receipt: {}", e))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| anyhow!("Failed to open receipts log: {}", e))?;
        writeln!(file, "{}", line).map_err(|e| anyhow!("Failed to append receipt: {}", e))?;

        debug!("Appended receipt for {} (dev fee: {})", receipt.address, receipt.is_dev_fee);
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<Receipt>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| anyhow!("Failed to read receipts log: {}", e))?;

        let mut receipts = Vec::new();
        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<Receipt>(line) {
                Ok(receipt) => receipts.push(receipt),
                // Torn lines are skipped; the rest of the log still counts
                Err(e) => warn!(
                    "[Receipts] Skipping malformed line {} in {}: {}",
                    line_no + 1,
                    self.path.display(),
                    e
                ),
            }
        }
        Ok(receipts)
    }
}

impl ReceiptStore for JsonlReceiptStore {
    fn read_receipts(&self) -> Vec<Receipt> {
        match self.read_all() {
            Ok(receipts) => {
                debug!("Read {} receipts from {}", receipts.len(), self.path.display());
                receipts
            }
            Err(e) => {
                warn!("[Receipts] {} - treating log as empty", e);
                Vec::new()
            }
        }
    }
}
