//! Game state projection and mutation application.
//!
//! [`GameStateProjector::project`] is the only place that reads every task
//! at once. It is pure and runs on every location tick. [`apply_mutations`]
//! and [`apply_completion`] return a new collection, leaving the caller's
//! untouched, so the host decides when (and whether) to commit.

use std::collections::BTreeMap;

use tracing::debug;

use geoquest_types::{CompletionDecision, PlayerContext, ProjectedTask, Task, TaskId};

use crate::activation::ActivationEvaluator;
use crate::logic::MutationSet;

/// Builds the per-render view of a task collection.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GameStateProjector {
    evaluator: ActivationEvaluator,
}

impl GameStateProjector {
    /// Create a projector around an activation evaluator.
    pub const fn new(evaluator: ActivationEvaluator) -> Self {
        Self { evaluator }
    }

    /// The evaluator used for each task.
    pub const fn evaluator(&self) -> &ActivationEvaluator {
        &self.evaluator
    }

    /// Project one task.
    ///
    /// A completed task leaves the active set (neither visible nor
    /// reachable) unless its policy keeps completed tasks on the map or the
    /// context is the editor.
    pub fn project_task(&self, task: &Task, context: &PlayerContext) -> ProjectedTask {
        let activation = self.evaluator.evaluate(task, context);
        let is_completed = task.is_completed || context.has_completed(&task.id);
        let removed = is_completed
            && !task.completion_logic.keeps_completed_visible()
            && !context.editor_mode;

        ProjectedTask {
            task_id: task.id.clone(),
            visible: activation.visible && !removed,
            reachable: activation.reachable && !removed,
            is_unlocked: task.is_unlocked,
            is_completed,
            display_order: task.order,
        }
    }

    /// Project every task, sorted by display order (stable for ties).
    pub fn project(&self, tasks: &[Task], context: &PlayerContext) -> Vec<ProjectedTask> {
        let mut projected: Vec<ProjectedTask> = tasks
            .iter()
            .map(|task| self.project_task(task, context))
            .collect();
        projected.sort_by_key(|task| task.display_order);
        projected
    }
}

/// Apply a mutation set to a copy of `tasks`.
///
/// Mutations apply in order. Both kinds set `isUnlocked`; nothing here ever
/// clears it. Mutations for ids missing from `tasks` are skipped. When ids
/// repeat, the first task with the id is the one updated, matching the task
/// [`propagate`](crate::logic::propagate) reads.
pub fn apply_mutations(tasks: &[Task], set: &MutationSet) -> Vec<Task> {
    let mut updated = tasks.to_vec();
    if set.is_empty() {
        return updated;
    }

    let mut index: BTreeMap<&TaskId, usize> = BTreeMap::new();
    for (position, task) in tasks.iter().enumerate() {
        index.entry(&task.id).or_insert(position);
    }

    for mutation in set {
        let target = index
            .get(&mutation.target_id)
            .and_then(|position| updated.get_mut(*position));
        match target {
            Some(task) => task.is_unlocked = true,
            None => debug!(target_id = %mutation.target_id, "mutation target vanished, skipping"),
        }
    }

    updated
}

/// Apply a completion decision for `task_id` to a copy of `tasks`.
///
/// Marks the task completed when the decision says so; never clears
/// `isCompleted` or `isUnlocked`.
pub fn apply_completion(
    tasks: &[Task],
    task_id: &TaskId,
    decision: CompletionDecision,
) -> Vec<Task> {
    let mut updated = tasks.to_vec();
    if !decision.should_mark_completed {
        return updated;
    }
    if let Some(task) = updated.iter_mut().find(|task| &task.id == task_id) {
        task.is_completed = true;
    }
    updated
}
