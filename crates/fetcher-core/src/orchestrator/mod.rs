//! ============================================================================
//! Orchestrator Module - Live mining session state
//! ============================================================================
//! The orchestrator only knows about addresses while a session is running.
//! Readers take a point-in-time snapshot; `None` means mining is stopped.
//!
//! ## Implementations
//! - [`SessionOrchestrator`]: in-process session state, updated by the miner
//! - [`SnapshotFileOrchestrator`]: a snapshot exported by another process
//! - [`NoSession`]: mining not running
//! ============================================================================

mod session;
mod snapshot;

pub use session::SessionOrchestrator;
pub use snapshot::SnapshotFileOrchestrator;

use crate::types::OrchestratorState;

/// Read side of the mining session
pub trait Orchestrator: Send + Sync {
    fn addresses_data(&self) -> Option<OrchestratorState>;
}

/// Mining is not running
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSession;

impl Orchestrator for NoSession {
    fn addresses_data(&self) -> Option<OrchestratorState> {
        None
    }
}
