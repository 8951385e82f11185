//! Logic-graph propagation.
//!
//! Each task may attach ordered actions to its triggers (`onOpen`,
//! `onCorrect`, `onIncorrect`). When a trigger fires, [`propagate`] walks the
//! actions of that one trigger on that one task and returns the resulting
//! [`MutationSet`]. It never follows edges out of the targets: a target's own
//! `onOpen` logic only fires when the player opens it. Propagation depth is
//! therefore one hop per player action, so cycles in the graph (A unlocks B,
//! B unlocks A) cannot recurse.
//!
//! Dangling targets are skipped and reported as [`EngineWarning`]s; they
//! never affect mutations for the remaining actions.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, warn};

use geoquest_types::{Mutation, MutationKind, Task, TaskId, Trigger};

use crate::error::EngineWarning;

/// Ordered state changes produced by one triggering event.
///
/// The host must apply the whole set as one update before handling the next
/// event. When two mutations target the same task, the later one wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MutationSet {
    mutations: Vec<Mutation>,
    warnings: Vec<EngineWarning>,
}

impl MutationSet {
    /// Create an empty set.
    pub const fn new() -> Self {
        Self {
            mutations: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// The mutations, in application order.
    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    /// Non-fatal findings raised while building the set.
    pub fn warnings(&self) -> &[EngineWarning] {
        &self.warnings
    }

    /// Whether the set changes nothing.
    pub const fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    /// Number of mutations.
    pub const fn len(&self) -> usize {
        self.mutations.len()
    }

    /// Iterate over the mutations in application order.
    pub fn iter(&self) -> core::slice::Iter<'_, Mutation> {
        self.mutations.iter()
    }

    /// Append all mutations and warnings of `other` after this set's own.
    pub fn extend(&mut self, other: Self) {
        self.mutations.extend(other.mutations);
        self.warnings.extend(other.warnings);
    }

    fn push(&mut self, target_id: TaskId, mutation: MutationKind) {
        self.mutations.push(Mutation {
            target_id,
            mutation,
        });
    }

    fn warn(&mut self, warning: EngineWarning) {
        warn!(%warning, "logic propagation warning");
        self.warnings.push(warning);
    }
}

impl<'a> IntoIterator for &'a MutationSet {
    type Item = &'a Mutation;
    type IntoIter = core::slice::Iter<'a, Mutation>;

    fn into_iter(self) -> Self::IntoIter {
        self.mutations.iter()
    }
}

/// Compute the mutations fired by `trigger` on `source_id`.
///
/// Returns an empty set when the source has no actions for the trigger. The
/// result depends only on the arguments.
pub fn propagate(source_id: &TaskId, trigger: Trigger, tasks: &[Task]) -> MutationSet {
    let mut set = MutationSet::new();

    let Some(source) = tasks.iter().find(|task| &task.id == source_id) else {
        set.warn(EngineWarning::UnknownSource {
            task_id: source_id.clone(),
        });
        return set;
    };

    let actions = source.actions_for(trigger);
    if actions.is_empty() {
        return set;
    }

    let known: BTreeSet<&TaskId> = tasks.iter().map(|task| &task.id).collect();

    for action in actions {
        let Some(kind) = action.action_type.mutation() else {
            debug!(source_id = %source_id, action_id = %action.id, "inert action type");
            continue;
        };

        if !known.contains(&action.target_id) {
            set.warn(EngineWarning::DanglingReference {
                source_id: source_id.clone(),
                trigger,
                action_id: action.id.clone(),
                target_id: action.target_id.clone(),
            });
            continue;
        }

        set.push(action.target_id.clone(), kind);
    }

    debug!(
        source_id = %source_id,
        %trigger,
        mutations = set.len(),
        warnings = set.warnings.len(),
        "logic propagated"
    );

    set
}

/// The explicit unlock a QR scan of `task_id` feeds into the engine.
pub fn scan_unlock(task_id: &TaskId, tasks: &[Task]) -> MutationSet {
    let mut set = MutationSet::new();
    if tasks.iter().any(|task| &task.id == task_id) {
        set.push(task_id.clone(), MutationKind::Unlock);
    } else {
        set.warn(EngineWarning::UnknownScanTarget {
            task_id: task_id.clone(),
        });
    }
    set
}
