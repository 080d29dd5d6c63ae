//! ============================================================================
//! Session Orchestrator - In-process session state
//! ============================================================================
//! Holds the address list, solved challenges and current challenge for the
//! running session. All fields live behind one lock so snapshots are
//! internally consistent.
//! ============================================================================

use anyhow::{anyhow, Result};
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

use super::Orchestrator;
use crate::types::{OrchestratorAddressEntry, OrchestratorState};

#[derive(Debug, Default)]
pub struct SessionOrchestrator {
    state: RwLock<Option<OrchestratorState>>,
}

impl SessionOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a session over the given addresses, replacing any previous one
    pub fn start_session(&self, addresses: Vec<OrchestratorAddressEntry>) {
        let count = addresses.len();
        *self.write() = Some(OrchestratorState {
            addresses,
            ..Default::default()
        });
        info!("[Session] Started with {} addresses", count);
    }

    /// End the session; readers see `None` afterwards
    pub fn stop_session(&self) {
        if self.write().take().is_some() {
            info!("[Session] Stopped");
        }
    }

    pub fn set_current_challenge(&self, challenge_id: impl Into<String>) -> Result<()> {
        let challenge_id = challenge_id.into();
        let mut guard = self.write();
        let state = guard.as_mut().ok_or_else(|| anyhow!("No active session"))?;
        debug!("[Session] Current challenge -> {}", challenge_id);
        state.current_challenge_id = Some(challenge_id);
        Ok(())
    }

    /// Mark the address at `index` as registered with the protocol
    pub fn mark_registered(&self, index: u32) -> Result<()> {
        let mut guard = self.write();
        let state = guard.as_mut().ok_or_else(|| anyhow!("No active session"))?;
        let entry = state
            .addresses
            .iter_mut()
            .find(|entry| entry.index == index)
            .ok_or_else(|| anyhow!("Address index {} not in session", index))?;
        entry.registered = true;
        Ok(())
    }

    /// Record that `bech32` solved `challenge_id`
    pub fn record_solution(&self, bech32: &str, challenge_id: &str) -> Result<()> {
        let mut guard = self.write();
        let state = guard.as_mut().ok_or_else(|| anyhow!("No active session"))?;
        state
            .solved_address_challenges
            .entry(bech32.to_string())
            .or_default()
            .insert(challenge_id.to_string());
        debug!("[Session] {} solved {}", bech32, challenge_id);
        Ok(())
    }

    /// Write the current snapshot as JSON for other processes to read
    pub fn export_snapshot(&self, path: &Path) -> Result<()> {
        let snapshot = self
            .addresses_data()
            .ok_or_else(|| anyhow!("No active session to export"))?;
        let json = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| anyhow!("Failed to serialize session snapshot: {}", e))?;
        std::fs::write(path, json)
            .map_err(|e| anyhow!("Failed to write session snapshot: {}", e))?;
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<OrchestratorState>> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<OrchestratorState>> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Orchestrator for SessionOrchestrator {
    fn addresses_data(&self) -> Option<OrchestratorState> {
        self.read().clone()
    }
}
