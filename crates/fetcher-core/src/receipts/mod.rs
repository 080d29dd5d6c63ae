//! ============================================================================
//! Receipts Module - Append-only log of accepted solutions
//! ============================================================================
//! The submitter appends one JSON line per accepted solution. Readers get the
//! whole log back in chronological order; a missing log is an empty log.
//! ============================================================================

mod store;

pub use store::JsonlReceiptStore;

use crate::types::Receipt;

/// Read side of the receipt log
pub trait ReceiptStore: Send + Sync {
    /// All receipts in append order. Never fails: missing or unreadable
    /// logs yield an empty sequence.
    fn read_receipts(&self) -> Vec<Receipt>;
}

/// Fixed receipt sequence, mostly useful for wiring tests and replays
impl ReceiptStore for Vec<Receipt> {
    fn read_receipts(&self) -> Vec<Receipt> {
        self.clone()
    }
}
