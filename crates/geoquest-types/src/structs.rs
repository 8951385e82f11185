//! Core record and value types for the GeoQuest task engine.
//!
//! Field names serialize in `camelCase` to match the records the UI host
//! and backing store exchange.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{ActionType, ActivationType, CompletionLogic, MutationKind, Trigger};
use crate::ids::{ActionId, ScoreEntryId, TaskId};

// ---------------------------------------------------------------------------
// Geography
// ---------------------------------------------------------------------------

/// A WGS84 latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Coordinate {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lng: f64,
}

impl Coordinate {
    /// Create a coordinate from latitude and longitude.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether this is the `(0, 0)` sentinel used for tasks not yet placed.
    pub fn is_unplaced(self) -> bool {
        self.lat.abs() < f64::EPSILON && self.lng.abs() < f64::EPSILON
    }
}

// ---------------------------------------------------------------------------
// Tasks and actions
// ---------------------------------------------------------------------------

/// An instruction fired by a trigger, pointing at another task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Action {
    /// Identifier of this action within its task.
    pub id: ActionId,
    /// What the action does.
    #[serde(rename = "type")]
    pub action_type: ActionType,
    /// The task the action applies to. May dangle.
    pub target_id: TaskId,
}

/// A placed, interactive game point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Task {
    /// Stable identifier, never reused while referenced.
    pub id: TaskId,
    /// Where the task sits; `(0, 0)` means not yet placed.
    #[serde(default)]
    pub location: Coordinate,
    /// Geofence radius used by [`ActivationType::Radius`].
    #[serde(default)]
    pub radius_meters: f64,
    /// Configured activation methods. Empty means never reachable.
    #[serde(default)]
    pub activation_types: BTreeSet<ActivationType>,
    /// Invisible to players until unlocked by logic or a scan.
    #[serde(default)]
    pub is_hidden_before_scan: bool,
    /// Unlock flag set by logic actions and scans.
    #[serde(default)]
    pub is_unlocked: bool,
    /// Completion flag set after an answer, per the completion policy.
    #[serde(default)]
    pub is_completed: bool,
    /// Post-answer policy.
    #[serde(default)]
    pub completion_logic: CompletionLogic,
    /// Outgoing actions per trigger, in declared order.
    #[serde(default)]
    pub logic: BTreeMap<Trigger, Vec<Action>>,
    /// Score awarded on correct completion.
    #[serde(default)]
    #[ts(type = "number")]
    pub points: i64,
    /// Display ordering index.
    #[serde(default)]
    #[ts(type = "number")]
    pub order: i64,
}

impl Task {
    /// Create an unplaced task with no activation methods, no logic, and the
    /// default completion policy.
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self {
            id: id.into(),
            location: Coordinate::default(),
            radius_meters: 0.0,
            activation_types: BTreeSet::new(),
            is_hidden_before_scan: false,
            is_unlocked: false,
            is_completed: false,
            completion_logic: CompletionLogic::default(),
            logic: BTreeMap::new(),
            points: 0,
            order: 0,
        }
    }

    /// The actions configured for a trigger, or an empty slice.
    pub fn actions_for(&self, trigger: Trigger) -> &[Action] {
        self.logic.get(&trigger).map_or(&[], Vec::as_slice)
    }

    /// Whether the task configures the given activation method.
    pub fn activates_by(&self, activation: ActivationType) -> bool {
        self.activation_types.contains(&activation)
    }
}

// ---------------------------------------------------------------------------
// Player context
// ---------------------------------------------------------------------------

/// Read-only player/team state consumed by evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct PlayerContext {
    /// Last GPS fix, if any.
    #[serde(default)]
    pub player_location: Option<Coordinate>,
    /// Accuracy radius of the fix in meters.
    #[serde(default)]
    pub accuracy: Option<f64>,
    /// Tasks the team has already completed.
    #[serde(default)]
    pub completed_task_ids: BTreeSet<TaskId>,
    /// Organizer view: every task is visible.
    #[serde(default)]
    pub editor_mode: bool,
    /// The task whose QR code the current event scanned.
    #[serde(default)]
    pub scanned_task_id: Option<TaskId>,
}

impl PlayerContext {
    /// Context for a player at a known location.
    pub fn at(location: Coordinate) -> Self {
        Self {
            player_location: Some(location),
            ..Self::default()
        }
    }

    /// Whether the team has completed the given task.
    pub fn has_completed(&self, task_id: &TaskId) -> bool {
        self.completed_task_ids.contains(task_id)
    }
}

// ---------------------------------------------------------------------------
// Engine outputs
// ---------------------------------------------------------------------------

/// Visibility and reachability of one task for one context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Activation {
    /// The player can see the task.
    pub visible: bool,
    /// The player can currently attempt the task.
    pub reachable: bool,
}

/// Outcome of applying a completion policy to an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct CompletionDecision {
    /// The task stays in the active set.
    pub should_remain_visible: bool,
    /// The task becomes completed.
    pub should_mark_completed: bool,
}

/// One state change produced by propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Mutation {
    /// The task to change.
    pub target_id: TaskId,
    /// The change to apply.
    pub mutation: MutationKind,
}

/// The per-render view of one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ProjectedTask {
    /// The projected task.
    pub task_id: TaskId,
    /// Shown to the player.
    pub visible: bool,
    /// Attemptable right now.
    pub reachable: bool,
    /// Authoritative unlock flag.
    pub is_unlocked: bool,
    /// Authoritative completion flag, merged with team progress.
    pub is_completed: bool,
    /// Ordering index for display.
    #[ts(type = "number")]
    pub display_order: i64,
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// A single award recorded in a team's score ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ScoreEntry {
    /// Entry identifier.
    pub id: ScoreEntryId,
    /// The task whose completion earned the points.
    pub task_id: TaskId,
    /// Points awarded.
    #[ts(type = "number")]
    pub points: i64,
    /// When the award was recorded.
    pub recorded_at: DateTime<Utc>,
}
