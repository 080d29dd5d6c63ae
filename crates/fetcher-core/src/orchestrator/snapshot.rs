//! Session snapshot exported to disk by a running miner.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::Orchestrator;
use crate::types::OrchestratorState;

pub struct SnapshotFileOrchestrator {
    path: PathBuf,
}

impl SnapshotFileOrchestrator {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Orchestrator for SnapshotFileOrchestrator {
    /// Missing or unparsable snapshots read as "mining not running"
    fn addresses_data(&self) -> Option<OrchestratorState> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                debug!("No session snapshot at {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_str::<OrchestratorState>(&content) {
            Ok(state) => Some(state),
            Err(e) => {
                warn!(
                    "[Session] Ignoring corrupt snapshot {}: {}",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_snapshot_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let orchestrator = SnapshotFileOrchestrator::new(dir.path().join("nope.json"));
        assert!(orchestrator.addresses_data().is_none());
    }

    #[test]
    fn test_corrupt_snapshot_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{ addresses: ").unwrap();
        assert!(SnapshotFileOrchestrator::new(&path).addresses_data().is_none());
    }

    #[test]
    fn test_reads_camel_case_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(
            &path,
            r#"{
                "addresses": [{"index": 0, "bech32": "a0", "registered": true}],
                "solvedAddressChallenges": {"a0": ["C42"]},
                "currentChallengeId": "C42"
            }"#,
        )
        .unwrap();

        let state = SnapshotFileOrchestrator::new(&path).addresses_data().unwrap();
        assert!(state.has_solved_current("a0"));
        assert!(state.addresses[0].registered);
    }
}
