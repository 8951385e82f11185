//! The score ledger: an append-only log of point awards.
//!
//! # Design
//!
//! - **Append-only**: entries are never modified or deleted.
//! - **Once per task**: a second award for the same task is a no-op.
//! - **Checked**: the running total uses checked arithmetic and reports
//!   overflow as [`LedgerError::ScoreOverflow`].

use std::collections::BTreeSet;

use chrono::Utc;
use serde::Serialize;

use geoquest_types::{ScoreEntry, ScoreEntryId, TaskId};

use crate::LedgerError;

/// The point awards recorded for one team.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScoreLedger {
    /// All entries, in insertion order.
    entries: Vec<ScoreEntry>,
    /// Tasks that have already awarded points.
    #[serde(skip)]
    awarded: BTreeSet<TaskId>,
    /// Sum of all entry points.
    total: i64,
}

impl ScoreLedger {
    /// Create a new empty ledger.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            awarded: BTreeSet::new(),
            total: 0,
        }
    }

    /// Rebuild a ledger from previously persisted entries.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::DuplicateAward`] if two entries share a task,
    /// or [`LedgerError::ScoreOverflow`] if the entries do not fit the total.
    pub fn from_entries(entries: Vec<ScoreEntry>) -> Result<Self, LedgerError> {
        let mut ledger = Self::new();
        for entry in entries {
            if ledger.awarded.contains(&entry.task_id) {
                return Err(LedgerError::DuplicateAward(entry.task_id));
            }
            ledger.total = checked_total(ledger.total, &entry.task_id, entry.points)?;
            ledger.awarded.insert(entry.task_id.clone());
            ledger.entries.push(entry);
        }
        Ok(ledger)
    }

    /// Return the number of entries in the ledger.
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return whether the ledger has no entries.
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The team's running score.
    pub const fn total(&self) -> i64 {
        self.total
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// Whether the task has already awarded its points.
    pub fn has_awarded(&self, task_id: &TaskId) -> bool {
        self.awarded.contains(task_id)
    }

    /// Award a task's points unless it already awarded them.
    ///
    /// Returns the new entry, or `None` when the task was already awarded.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::ScoreOverflow`] if the total would overflow.
    /// The ledger is unchanged in that case.
    pub fn award(
        &mut self,
        task_id: &TaskId,
        points: i64,
    ) -> Result<Option<&ScoreEntry>, LedgerError> {
        if self.awarded.contains(task_id) {
            tracing::debug!(task_id = %task_id, "points already awarded, skipping");
            return Ok(None);
        }

        let total = checked_total(self.total, task_id, points)?;
        self.total = total;
        self.awarded.insert(task_id.clone());
        self.entries.push(ScoreEntry {
            id: ScoreEntryId::new(),
            task_id: task_id.clone(),
            points,
            recorded_at: Utc::now(),
        });
        tracing::debug!(task_id = %task_id, points, total, "points awarded");

        Ok(self.entries.last())
    }
}

fn checked_total(total: i64, task_id: &TaskId, points: i64) -> Result<i64, LedgerError> {
    total
        .checked_add(points)
        .ok_or_else(|| LedgerError::ScoreOverflow {
            task_id: task_id.clone(),
            points,
        })
}
