//! Editor-facing data-quality audit over a whole task set.
//!
//! The audit reports the same kinds of problems evaluation and propagation
//! tolerate at play time (dangling targets, tasks that can never be reached)
//! up front, so organizers can fix them before the game starts.

use std::collections::BTreeSet;

use tracing::warn;

use geoquest_types::{ActionType, ActivationType, Task, TaskId, Trigger};

use crate::error::EngineWarning;

/// Audit a task collection and return every finding, grouped per task in
/// collection order.
pub fn audit(tasks: &[Task]) -> Vec<EngineWarning> {
    let mut findings = Vec::new();
    let mut seen: BTreeSet<&TaskId> = BTreeSet::new();
    let known: BTreeSet<&TaskId> = tasks.iter().map(|task| &task.id).collect();

    for task in tasks {
        if !seen.insert(&task.id) {
            findings.push(EngineWarning::DuplicateTaskId {
                task_id: task.id.clone(),
            });
        }

        audit_activation(task, &mut findings);

        for trigger in Trigger::ALL {
            for action in task.actions_for(trigger) {
                if action.action_type == ActionType::Other {
                    findings.push(EngineWarning::InertAction {
                        source_id: task.id.clone(),
                        trigger,
                        action_id: action.id.clone(),
                    });
                } else if !known.contains(&action.target_id) {
                    findings.push(EngineWarning::DanglingReference {
                        source_id: task.id.clone(),
                        trigger,
                        action_id: action.id.clone(),
                        target_id: action.target_id.clone(),
                    });
                }
            }
        }
    }

    for finding in &findings {
        warn!(%finding, "task data-quality finding");
    }

    findings
}

fn audit_activation(task: &Task, findings: &mut Vec<EngineWarning>) {
    if task.activation_types.is_empty() {
        findings.push(EngineWarning::NoActivationMethod {
            task_id: task.id.clone(),
        });
        return;
    }

    if !task.activates_by(ActivationType::Radius) {
        return;
    }
    if task.location.is_unplaced() {
        findings.push(EngineWarning::UnplacedGeofence {
            task_id: task.id.clone(),
        });
    }
    if task.radius_meters <= 0.0 {
        findings.push(EngineWarning::NonPositiveRadius {
            task_id: task.id.clone(),
            radius_meters: task.radius_meters,
        });
    }
}
