//! Non-fatal findings raised by the engine.
//!
//! Nothing the engine detects aborts an operation. Data-quality problems are
//! reported as [`EngineWarning`] values alongside the result so the host can
//! surface them in the editor; players only ever see "not yet available".

use serde::Serialize;

use geoquest_types::{ActionId, TaskId, Trigger};

/// A recoverable data-quality finding.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum EngineWarning {
    /// An action targets a task that is not in the collection.
    #[error("action {action_id} on {source_id}.{trigger} targets missing task {target_id}")]
    DanglingReference {
        /// Task owning the action.
        source_id: TaskId,
        /// Trigger the action is attached to.
        trigger: Trigger,
        /// The offending action.
        action_id: ActionId,
        /// The missing target.
        target_id: TaskId,
    },

    /// Propagation was requested for a task that is not in the collection.
    #[error("logic source task {task_id} not found")]
    UnknownSource {
        /// The missing source task.
        task_id: TaskId,
    },

    /// A QR scan named a task that is not in the collection.
    #[error("scanned task {task_id} not found")]
    UnknownScanTarget {
        /// The missing scanned task.
        task_id: TaskId,
    },

    /// The task has no activation methods and can never be reached.
    #[error("task {task_id} has no activation method and is unreachable")]
    NoActivationMethod {
        /// The unreachable task.
        task_id: TaskId,
    },

    /// The task uses a geofence but has not been placed on the map.
    #[error("task {task_id} activates by radius but has no location")]
    UnplacedGeofence {
        /// The unplaced task.
        task_id: TaskId,
    },

    /// The task uses a geofence with a radius that admits no one.
    #[error("task {task_id} activates by radius with non-positive radius {radius_meters}")]
    NonPositiveRadius {
        /// The task.
        task_id: TaskId,
        /// The configured radius.
        radius_meters: f64,
    },

    /// Two tasks in the collection share an identifier.
    #[error("duplicate task id {task_id}")]
    DuplicateTaskId {
        /// The repeated identifier.
        task_id: TaskId,
    },

    /// An action has a type the engine does not act on.
    #[error("action {action_id} on {source_id}.{trigger} has an inert type")]
    InertAction {
        /// Task owning the action.
        source_id: TaskId,
        /// Trigger the action is attached to.
        trigger: Trigger,
        /// The inert action.
        action_id: ActionId,
    },
}
