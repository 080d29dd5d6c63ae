//! ============================================================================
//! Core Types for the Fetcher Address Ledger
//! ============================================================================
//! Defines the records read from receipts, wallet and orchestrator, and the
//! reconciled views handed to the presentation layer.
//! These types are serialized to JSON (camelCase) for the dashboard.
//! ============================================================================

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Read an explicit JSON `null` the same as a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Source Records
// ============================================================================

/// One accepted solution submission, as written to the receipt log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Receipt {
    /// Submission time (opaque: ISO string or millis, as written by the submitter)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts: Option<serde_json::Value>,
    /// bech32 address the solution was mined for
    pub address: String,
    /// Wallet derivation index, absent for foreign (dev fee) addresses
    #[serde(rename = "addressIndex", default, skip_serializing_if = "Option::is_none")]
    pub address_index: Option<u32>,
    #[serde(alias = "challengeId", default, skip_serializing_if = "Option::is_none")]
    pub challenge_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    /// Signed receipt returned by the protocol
    #[serde(alias = "cryptoReceipt", default, skip_serializing_if = "Option::is_none")]
    pub crypto_receipt: Option<serde_json::Value>,
    /// Solution was mined for the developer fee pool
    #[serde(rename = "isDevFee", default, deserialize_with = "null_as_default")]
    pub is_dev_fee: bool,
}

/// One address in the wallet's deterministic address universe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WalletAddress {
    pub index: u32,
    pub bech32: String,
    /// Last known registration flag persisted with the wallet
    #[serde(default, deserialize_with = "null_as_default")]
    pub registered: bool,
}

/// Address entry held by a live mining session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrchestratorAddressEntry {
    pub index: u32,
    pub bech32: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub registered: bool,
}

/// Point-in-time view of a mining session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrchestratorState {
    pub addresses: Vec<OrchestratorAddressEntry>,
    /// bech32 -> challenge ids this address has solved
    #[serde(default)]
    pub solved_address_challenges: BTreeMap<String, BTreeSet<String>>,
    #[serde(default)]
    pub current_challenge_id: Option<String>,
}

impl OrchestratorState {
    /// Whether `bech32` has solved the session's current challenge.
    /// Missing challenge id or missing entry is `false`, never an error.
    pub fn has_solved_current(&self, bech32: &str) -> bool {
        match &self.current_challenge_id {
            Some(challenge_id) => self
                .solved_address_challenges
                .get(bech32)
                .map(|solved| solved.contains(challenge_id))
                .unwrap_or(false),
            None => false,
        }
    }

    /// Look up the session's entry for a derivation index
    pub fn entry_for_index(&self, index: u32) -> Option<&OrchestratorAddressEntry> {
        self.addresses.iter().find(|entry| entry.index == index)
    }
}

// ============================================================================
// Reconciled Views
// ============================================================================

/// Per-address status after merging receipts, wallet and session state.
/// `total_solutions > 0` always implies `registered`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReconciledAddressView {
    pub index: u32,
    pub bech32: String,
    pub registered: bool,
    pub solved_current_challenge: bool,
    pub total_solutions: u64,
}

/// Aggregate counts over a reconciled address set
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationSummary {
    pub total_addresses: usize,
    pub registered_addresses: usize,
    pub solved_current_challenge: usize,
}

/// Payload returned by the address query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddressesResponse {
    pub success: bool,
    pub current_challenge: Option<String>,
    pub addresses: Vec<ReconciledAddressView>,
    pub summary: ReconciliationSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AddressesResponse {
    /// Defaulted payload for a query that failed outright
    pub fn failed(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            current_challenge: None,
            addresses: Vec::new(),
            summary: ReconciliationSummary::default(),
            error: Some(msg.into()),
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Outcome of reading an optional source (wallet, session snapshot).
/// Both variants lead to the same fallback; only logging differs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("Source unavailable")]
    Unavailable,

    #[error("Source corrupt: {0}")]
    Corrupt(String),
}

/// Error types for the ledger
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum FetcherError {
    #[error("Source corrupt: {0}")]
    SourceCorrupt(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for FetcherError {
    fn from(e: std::io::Error) -> Self {
        FetcherError::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_parses_logger_line() {
        let line = concat!(
            r#"{"ts":"2025-11-02T10:00:00Z","address":"addr1q","addressIndex":3,"#,
            r#""challenge_id":"**D07C10","nonce":"00ff","hash":"abcd","isDevFee":false}"#
        );
        let receipt: Receipt = serde_json::from_str(line).unwrap();
        assert_eq!(receipt.address_index, Some(3));
        assert_eq!(receipt.challenge_id.as_deref(), Some("**D07C10"));
        assert!(!receipt.is_dev_fee);
    }

    #[test]
    fn test_receipt_defaults_missing_flags() {
        let receipt: Receipt = serde_json::from_str(r#"{"address":"fee1"}"#).unwrap();
        assert_eq!(receipt.address_index, None);
        assert!(!receipt.is_dev_fee);
    }

    #[test]
    fn test_null_flags_read_as_false() {
        let receipt: Receipt =
            serde_json::from_str(r#"{"address":"a0","addressIndex":0,"isDevFee":null}"#).unwrap();
        assert!(!receipt.is_dev_fee);

        let address: WalletAddress =
            serde_json::from_str(r#"{"index":1,"bech32":"a1","registered":null}"#).unwrap();
        assert!(!address.registered);
    }

    #[test]
    fn test_has_solved_current() {
        let mut state = OrchestratorState {
            current_challenge_id: Some("C42".into()),
            ..Default::default()
        };
        state
            .solved_address_challenges
            .insert("a1".into(), ["C42".to_string()].into_iter().collect());
        state
            .solved_address_challenges
            .insert("a2".into(), ["C41".to_string()].into_iter().collect());

        assert!(state.has_solved_current("a1"));
        assert!(!state.has_solved_current("a2"));
        assert!(!state.has_solved_current("a3"));

        state.current_challenge_id = None;
        assert!(!state.has_solved_current("a1"));
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let view = ReconciledAddressView {
            index: 0,
            bech32: "a1".into(),
            registered: true,
            solved_current_challenge: false,
            total_solutions: 2,
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["solvedCurrentChallenge"], false);
        assert_eq!(json["totalSolutions"], 2);
    }

    #[test]
    fn test_failed_response_is_zeroed() {
        let resp = AddressesResponse::failed("boom");
        assert!(!resp.success);
        assert!(resp.addresses.is_empty());
        assert_eq!(resp.summary, ReconciliationSummary::default());
        assert_eq!(resp.error.as_deref(), Some("boom"));
    }
}
