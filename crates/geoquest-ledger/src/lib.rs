//! Team score ledger for the GeoQuest task engine.
//!
//! Every point a team earns is recorded here. The ledger is append-only and
//! keyed by task: a task awards its points at most once per team, no matter
//! how many times its completion is reported (local retries, a second
//! correct answer on a `keep_always` task, or the same completion arriving
//! from another team member's device).
//!
//! # Usage
//!
//! ```
//! use geoquest_ledger::ScoreLedger;
//! use geoquest_types::TaskId;
//!
//! let mut ledger = ScoreLedger::new();
//! let task = TaskId::from("fountain");
//!
//! let first = ledger.award(&task, 10).ok().flatten().is_some();
//! let second = ledger.award(&task, 10).ok().flatten().is_some();
//!
//! assert!(first);
//! assert!(!second);
//! assert_eq!(ledger.total(), 10);
//! ```

pub mod ledger;

// Re-export primary types at crate root.
pub use ledger::ScoreLedger;

use geoquest_types::TaskId;

/// Errors that can occur when recording score entries.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Adding the award would overflow the running total.
    #[error("score overflow awarding {points} points for task {task_id}")]
    ScoreOverflow {
        /// The task being awarded.
        task_id: TaskId,
        /// The points that could not be added.
        points: i64,
    },

    /// A restored entry list awards the same task twice.
    #[error("task {0} was awarded more than once")]
    DuplicateAward(TaskId),
}
