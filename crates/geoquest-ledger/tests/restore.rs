//! Integration tests for restoring a team ledger from persisted entries.
//!
//! A host persists `entries()` as JSON and rebuilds the ledger on reload; the
//! rebuilt ledger must keep refusing awards for tasks already scored.

#![allow(clippy::unwrap_used)]

use geoquest_ledger::{LedgerError, ScoreLedger};
use geoquest_types::{ScoreEntry, TaskId};

#[test]
fn reloaded_ledger_keeps_award_once() {
    let mut ledger = ScoreLedger::new();
    ledger.award(&TaskId::from("gate"), 5).unwrap();
    ledger.award(&TaskId::from("tower"), 10).unwrap();

    let stored = serde_json::to_string(ledger.entries()).unwrap();
    let entries: Vec<ScoreEntry> = serde_json::from_str(&stored).unwrap();
    let mut restored = ScoreLedger::from_entries(entries).unwrap();

    assert_eq!(restored.total(), 15);
    assert!(restored.has_awarded(&TaskId::from("tower")));
    assert!(restored.award(&TaskId::from("tower"), 10).unwrap().is_none());
    assert!(restored.award(&TaskId::from("lake"), 1).unwrap().is_some());
    assert_eq!(restored.total(), 16);
}

#[test]
fn tampered_entries_are_rejected() {
    let mut ledger = ScoreLedger::new();
    ledger.award(&TaskId::from("gate"), 5).unwrap();
    let mut entries = ledger.entries().to_vec();
    entries.extend_from_slice(ledger.entries());

    let result = ScoreLedger::from_entries(entries);
    assert!(matches!(result, Err(LedgerError::DuplicateAward(id)) if id.as_str() == "gate"));
}
