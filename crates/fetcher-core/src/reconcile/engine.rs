//! ============================================================================
//! Reconciliation Engine - Merge receipts, wallet and session into one view
//! ============================================================================
//! Universe precedence (include_all): Wallet -> Orchestrator -> ReceiptsOnly.
//! Without include_all the universe is always ReceiptsOnly.
//!
//! Registration rule: `registered = source flags || has_solutions`. A solution
//! can only be accepted for a registered address, so stale flags lose.
//! ============================================================================

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::tally::SolutionTally;
use crate::types::{
    OrchestratorAddressEntry, OrchestratorState, Receipt, ReconciledAddressView,
    ReconciliationSummary, SourceError, WalletAddress,
};

/// Which source defines the set of addresses reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressUniverse {
    Wallet(Vec<WalletAddress>),
    Orchestrator(Vec<OrchestratorAddressEntry>),
    ReceiptsOnly,
}

impl AddressUniverse {
    /// Pick the universe for a query.
    /// A corrupt wallet is logged and treated exactly like a missing one.
    pub fn select(
        include_all: bool,
        wallet: Result<Vec<WalletAddress>, SourceError>,
        snapshot: Option<&OrchestratorState>,
    ) -> Self {
        if !include_all {
            return AddressUniverse::ReceiptsOnly;
        }

        match wallet {
            Ok(addresses) => return AddressUniverse::Wallet(addresses),
            Err(SourceError::Unavailable) => debug!("No wallet file, falling back"),
            Err(SourceError::Corrupt(e)) => warn!(
                "[Reconcile] Failed to read wallet file, falling back to orchestrator data: {}",
                e
            ),
        }

        match snapshot {
            Some(state) => AddressUniverse::Orchestrator(state.addresses.clone()),
            None => AddressUniverse::ReceiptsOnly,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AddressUniverse::Wallet(_) => "wallet",
            AddressUniverse::Orchestrator(_) => "orchestrator",
            AddressUniverse::ReceiptsOnly => "receipts",
        }
    }
}

/// Result of one reconciliation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    pub current_challenge: Option<String>,
    pub addresses: Vec<ReconciledAddressView>,
    pub summary: ReconciliationSummary,
}

/// Full pipeline over already-read sources: tally, select, enrich, summarize
pub fn reconcile_sources(
    receipts: &[Receipt],
    wallet: Result<Vec<WalletAddress>, SourceError>,
    snapshot: Option<&OrchestratorState>,
    include_all: bool,
) -> Reconciliation {
    let tally = SolutionTally::from_receipts(receipts);
    let universe = AddressUniverse::select(include_all, wallet, snapshot);
    let addresses = reconcile(&universe, &tally, snapshot);
    let summary = summarize(&addresses);

    debug!(
        "Reconciled {} addresses from {} universe ({} registered, {} solved current, {} solutions)",
        summary.total_addresses,
        universe.kind(),
        summary.registered_addresses,
        summary.solved_current_challenge,
        tally.total_solutions()
    );

    Reconciliation {
        current_challenge: snapshot.and_then(|s| s.current_challenge_id.clone()),
        addresses,
        summary,
    }
}

/// Enrich every address in `universe`; output is strictly ascending by index
pub fn reconcile(
    universe: &AddressUniverse,
    tally: &SolutionTally,
    snapshot: Option<&OrchestratorState>,
) -> Vec<ReconciledAddressView> {
    // (index, bech32, registration flag reported by the source)
    let seeds: Vec<(u32, &str, bool)> = match universe {
        AddressUniverse::Wallet(addresses) => addresses
            .iter()
            .map(|a| {
                let flag = a.registered || session_flag(snapshot, a.index, &a.bech32);
                (a.index, a.bech32.as_str(), flag)
            })
            .collect(),
        AddressUniverse::Orchestrator(entries) => entries
            .iter()
            .map(|e| (e.index, e.bech32.as_str(), e.registered))
            .collect(),
        AddressUniverse::ReceiptsOnly => tally
            .addresses_by_index()
            .iter()
            .map(|(index, seen)| {
                (*index, seen.bech32.as_str(), session_flag(snapshot, *index, &seen.bech32))
            })
            .collect(),
    };

    let mut by_index: BTreeMap<u32, ReconciledAddressView> = BTreeMap::new();
    for (index, bech32, source_registered) in seeds {
        if by_index.contains_key(&index) {
            warn!(
                "[Reconcile] Duplicate index {} ({}) in {} universe, keeping first",
                index,
                bech32,
                universe.kind()
            );
            continue;
        }

        let total_solutions = tally.solutions_for(bech32);
        let solved_current_challenge = snapshot
            .map(|state| state.has_solved_current(bech32))
            .unwrap_or(false);

        by_index.insert(
            index,
            ReconciledAddressView {
                index,
                bech32: bech32.to_string(),
                registered: source_registered || tally.has_solutions(bech32),
                solved_current_challenge,
                total_solutions,
            },
        );
    }

    by_index.into_values().collect()
}

/// Counts over a reconciled set
pub fn summarize(addresses: &[ReconciledAddressView]) -> ReconciliationSummary {
    ReconciliationSummary {
        total_addresses: addresses.len(),
        registered_addresses: addresses.iter().filter(|a| a.registered).count(),
        solved_current_challenge: addresses
            .iter()
            .filter(|a| a.solved_current_challenge)
            .count(),
    }
}

/// Session's registration flag for the same index and address
fn session_flag(snapshot: Option<&OrchestratorState>, index: u32, bech32: &str) -> bool {
    snapshot
        .and_then(|state| state.entry_for_index(index))
        .map(|entry| entry.bech32 == bech32 && entry.registered)
        .unwrap_or(false)
}
