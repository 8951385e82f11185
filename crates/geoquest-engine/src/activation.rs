//! Per-task visibility and reachability.
//!
//! A task is visible unless it is hidden before scan and still locked (the
//! editor sees everything). It is reachable when it is visible and at least
//! one of its activation methods currently succeeds:
//!
//! | Method | Succeeds when |
//! |--------|---------------|
//! | `radius` | the player has a fix within `radiusMeters` of the task |
//! | `click` | always |
//! | `qr` | the current event is a scan of this task |
//!
//! Evaluation looks at one task and the context only. It runs on every
//! location tick, so it never scans the rest of the collection.

use tracing::debug;

use geoquest_types::{Activation, ActivationType, Coordinate, PlayerContext, Task};

use crate::config::ActivationConfig;
use crate::geo;

/// Whether the task is shown to the player.
pub fn is_visible(task: &Task, context: &PlayerContext) -> bool {
    !task.is_hidden_before_scan || task.is_unlocked || context.editor_mode
}

/// Computes [`Activation`] for a task in a player context.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActivationEvaluator {
    /// Fixes with a worse accuracy radius than this do not count.
    max_accuracy_m: Option<f64>,
}

impl ActivationEvaluator {
    /// Create an evaluator from configuration.
    pub const fn new(config: &ActivationConfig) -> Self {
        Self {
            max_accuracy_m: config.max_accuracy_m,
        }
    }

    /// Evaluate visibility and reachability of `task`.
    pub fn evaluate(&self, task: &Task, context: &PlayerContext) -> Activation {
        let visible = is_visible(task, context);

        if task.activation_types.is_empty() {
            debug!(task_id = %task.id, "task has no activation method, never reachable");
            return Activation {
                visible,
                reachable: false,
            };
        }

        let reachable = visible
            && task
                .activation_types
                .iter()
                .any(|method| self.method_succeeds(*method, task, context));

        Activation { visible, reachable }
    }

    fn method_succeeds(&self, method: ActivationType, task: &Task, context: &PlayerContext) -> bool {
        match method {
            ActivationType::Radius => self.usable_fix(context).is_some_and(|player| {
                geo::within_radius(player, task.location, task.radius_meters)
            }),
            ActivationType::Click => true,
            ActivationType::Qr => context.scanned_task_id.as_ref() == Some(&task.id),
        }
    }

    /// The player's location, unless the fix fails the accuracy gate.
    fn usable_fix(&self, context: &PlayerContext) -> Option<Coordinate> {
        let location = context.player_location?;
        match (self.max_accuracy_m, context.accuracy) {
            (Some(max), Some(accuracy)) if accuracy > max => None,
            _ => Some(location),
        }
    }
}
