//! ============================================================================
//! Solution Tally - Single pass over the receipt log
//! ============================================================================
//! Counts user solutions per address and remembers which address each
//! derivation index last mined for. Dev fee receipts and receipts without an
//! index never contribute.
//! ============================================================================

use std::collections::{BTreeMap, HashMap};

use crate::types::Receipt;

/// Address seen at a derivation index, with its running solution count
/// at the time of the last receipt for that index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedAddress {
    pub bech32: String,
    pub solutions: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolutionTally {
    solutions_by_address: HashMap<String, u64>,
    addresses_by_index: BTreeMap<u32, IndexedAddress>,
}

impl SolutionTally {
    pub fn from_receipts(receipts: &[Receipt]) -> Self {
        receipts
            .iter()
            .filter(|receipt| !receipt.is_dev_fee)
            .filter_map(|receipt| receipt.address_index.map(|index| (index, receipt)))
            .fold(Self::default(), |mut tally, (index, receipt)| {
                let count = tally
                    .solutions_by_address
                    .entry(receipt.address.clone())
                    .or_insert(0);
                *count += 1;
                let solutions = *count;

                // Last write wins: a later receipt for the same index replaces the address
                tally.addresses_by_index.insert(
                    index,
                    IndexedAddress {
                        bech32: receipt.address.clone(),
                        solutions,
                    },
                );
                tally
            })
    }

    /// User solutions credited to `bech32` (0 when unseen)
    pub fn solutions_for(&self, bech32: &str) -> u64 {
        self.solutions_by_address.get(bech32).copied().unwrap_or(0)
    }

    pub fn has_solutions(&self, bech32: &str) -> bool {
        self.solutions_for(bech32) > 0
    }

    /// Index-ordered addresses discovered in the log
    pub fn addresses_by_index(&self) -> &BTreeMap<u32, IndexedAddress> {
        &self.addresses_by_index
    }

    /// Sum of all user (non dev fee) solutions
    pub fn total_solutions(&self) -> u64 {
        self.solutions_by_address.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn receipt(address: &str, index: Option<u32>, dev_fee: bool) -> Receipt {
        Receipt {
            ts: None,
            address: address.into(),
            address_index: index,
            challenge_id: None,
            nonce: None,
            hash: None,
            crypto_receipt: None,
            is_dev_fee: dev_fee,
        }
    }

    #[test]
    fn test_dev_fee_receipts_never_count() {
        let receipts = vec![
            receipt("a1", Some(0), false),
            receipt("fee1", None, true),
            // Dev fee flagged but carrying an index still doesn't count
            receipt("a1", Some(0), true),
        ];
        let tally = SolutionTally::from_receipts(&receipts);

        assert_eq!(tally.solutions_for("a1"), 1);
        assert_eq!(tally.solutions_for("fee1"), 0);
        assert_eq!(tally.total_solutions(), 1);
    }

    #[test]
    fn test_receipts_without_index_are_skipped() {
        let tally = SolutionTally::from_receipts(&[receipt("a1", None, false)]);
        assert!(!tally.has_solutions("a1"));
        assert!(tally.addresses_by_index().is_empty());
    }

    #[test]
    fn test_last_write_wins_per_index() {
        let receipts = vec![
            receipt("old", Some(4), false),
            receipt("old", Some(4), false),
            receipt("new", Some(4), false),
        ];
        let tally = SolutionTally::from_receipts(&receipts);

        let entry = &tally.addresses_by_index()[&4];
        assert_eq!(entry.bech32, "new");
        assert_eq!(entry.solutions, 1);
        assert_eq!(tally.solutions_for("old"), 2);
    }
}
