//! ============================================================================
//! Reconcile Module - Per-address registration and challenge status
//! ============================================================================
//! Merges three sources with different lifetimes:
//! - **Receipts**: durable, survives restarts, only knows addresses that mined
//! - **Wallet**: every generated address, may be missing or unreadable
//! - **Orchestrator**: live session state, gone when mining stops
//!
//! ## Pipeline
//! ```text
//! receipts ──▶ SolutionTally ─┐
//! wallet ─────────────────────┼─▶ AddressUniverse ─▶ reconcile ─▶ summarize
//! orchestrator ───────────────┘
//! ```
//!
//! Everything here is pure: callers read the sources, the engine merges them.
//! ============================================================================

mod engine;
mod tally;

pub use engine::{reconcile, reconcile_sources, summarize, AddressUniverse, Reconciliation};
pub use tally::{IndexedAddress, SolutionTally};
