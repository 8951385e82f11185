//! Record normalization at the data boundary.
//!
//! Records from the backing store are looser than [`Task`]:
//!
//! - actions may be bare target ids instead of `{ id, type, targetId }`
//!   objects, or objects without an `id` or `type`
//! - the logic map may carry trigger keys the engine does not know
//! - `location` may be `null`
//!
//! [`TaskRecord`] accepts all of that and [`TaskRecord::into_task`] turns it
//! into the canonical form, so propagation only ever sees tagged actions and
//! recognized triggers. Legacy actions get the type `unlock` and a derived id
//! of the form `{task}:{trigger}:{index}`.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::debug;

use geoquest_types::{
    Action, ActionId, ActionType, ActivationType, CompletionLogic, Coordinate, Task, TaskId,
    Trigger,
};

/// Errors that can occur while loading task records.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The input is not valid JSON for the record shape.
    #[error("failed to parse task records: {source}")]
    Json {
        /// The underlying parse error.
        #[from]
        source: serde_json::Error,
    },

    /// A record has an empty id.
    #[error("task record at index {index} has an empty id")]
    EmptyTaskId {
        /// Position of the record in the input.
        index: usize,
    },
}

/// A task as stored by the backing store.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// Task identifier.
    pub id: TaskId,
    /// Placement; `null` or absent means unplaced.
    #[serde(default)]
    pub location: Option<Coordinate>,
    /// Geofence radius.
    #[serde(default)]
    pub radius_meters: Option<f64>,
    /// Activation methods, possibly with repeats.
    #[serde(default)]
    pub activation_types: Vec<ActivationType>,
    /// Hidden until unlocked by logic or a scan.
    #[serde(default)]
    pub is_hidden_before_scan: bool,
    /// Unlock flag.
    #[serde(default)]
    pub is_unlocked: bool,
    /// Completion flag.
    #[serde(default)]
    pub is_completed: bool,
    /// Post-answer policy.
    #[serde(default)]
    pub completion_logic: CompletionLogic,
    /// Raw logic map keyed by trigger name.
    #[serde(default)]
    pub logic: BTreeMap<String, Vec<ActionRecord>>,
    /// Score value.
    #[serde(default)]
    pub points: i64,
    /// Display ordering index.
    #[serde(default)]
    pub order: i64,
}

/// An action as stored by the backing store.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ActionRecord {
    /// Object form, possibly missing `id` or `type`.
    Tagged(TaggedActionRecord),
    /// Legacy form: just the target id.
    Bare(TaskId),
}

/// Object form of an action record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaggedActionRecord {
    /// Action identifier, if one was assigned.
    #[serde(default)]
    pub id: Option<ActionId>,
    /// Action type; legacy records omit it and mean `unlock`.
    #[serde(default = "default_action_type", rename = "type")]
    pub action_type: ActionType,
    /// Target task.
    pub target_id: TaskId,
}

const fn default_action_type() -> ActionType {
    ActionType::Unlock
}

impl TaskRecord {
    /// Normalize into the canonical [`Task`].
    pub fn into_task(self) -> Task {
        let mut logic = BTreeMap::new();
        for (key, records) in self.logic {
            let Some(trigger) = Trigger::from_key(&key) else {
                debug!(task_id = %self.id, trigger = %key, "ignoring unrecognized trigger");
                continue;
            };
            let actions = records
                .into_iter()
                .enumerate()
                .map(|(index, record)| normalize_action(&self.id, trigger, index, record))
                .collect();
            logic.insert(trigger, actions);
        }

        Task {
            id: self.id,
            location: self.location.unwrap_or_default(),
            radius_meters: self.radius_meters.unwrap_or_default(),
            activation_types: self.activation_types.into_iter().collect(),
            is_hidden_before_scan: self.is_hidden_before_scan,
            is_unlocked: self.is_unlocked,
            is_completed: self.is_completed,
            completion_logic: self.completion_logic,
            logic,
            points: self.points,
            order: self.order,
        }
    }
}

fn normalize_action(task_id: &TaskId, trigger: Trigger, index: usize, record: ActionRecord) -> Action {
    match record {
        ActionRecord::Tagged(tagged) => Action {
            id: tagged
                .id
                .unwrap_or_else(|| derived_action_id(task_id, trigger, index)),
            action_type: tagged.action_type,
            target_id: tagged.target_id,
        },
        ActionRecord::Bare(target_id) => {
            debug!(task_id = %task_id, %trigger, target_id = %target_id, "migrating bare-id action");
            Action {
                id: derived_action_id(task_id, trigger, index),
                action_type: ActionType::Unlock,
                target_id,
            }
        }
    }
}

fn derived_action_id(task_id: &TaskId, trigger: Trigger, index: usize) -> ActionId {
    ActionId::new(format!("{task_id}:{trigger}:{index}"))
}

/// Normalize a list of records, rejecting records with empty ids.
///
/// # Errors
///
/// Returns [`LoadError::EmptyTaskId`] for the first record with an empty id.
pub fn normalize(records: Vec<TaskRecord>) -> Result<Vec<Task>, LoadError> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            if record.id.as_str().trim().is_empty() {
                return Err(LoadError::EmptyTaskId { index });
            }
            Ok(record.into_task())
        })
        .collect()
}

/// Parse a JSON array of task records into canonical tasks.
///
/// # Errors
///
/// Returns [`LoadError::Json`] if the input is malformed, or
/// [`LoadError::EmptyTaskId`] if a record has an empty id.
pub fn parse_tasks(json: &str) -> Result<Vec<Task>, LoadError> {
    let records: Vec<TaskRecord> = serde_json::from_str(json)?;
    normalize(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_one(json: &str) -> Option<Task> {
        parse_tasks(json).ok().and_then(|tasks| tasks.into_iter().next())
    }

    #[test]
    fn canonical_record_loads_unchanged() {
        let task = parse_one(
            r#"[{
                "id": "A",
                "location": { "lat": 10.0, "lng": 20.0 },
                "radiusMeters": 30,
                "activationTypes": ["radius"],
                "completionLogic": "remove_any",
                "logic": { "onCorrect": [{ "id": "a1", "type": "reveal", "targetId": "B" }] },
                "points": 5,
                "order": 1
            }]"#,
        );
        let task = task.unwrap_or_else(|| Task::new("missing"));

        assert_eq!(task.id.as_str(), "A");
        assert_eq!(task.completion_logic, CompletionLogic::RemoveAny);
        let actions = task.actions_for(Trigger::OnCorrect);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions.first().map(|a| a.id.as_str()), Some("a1"));
        assert_eq!(actions.first().map(|a| a.action_type), Some(ActionType::Reveal));
    }

    #[test]
    fn bare_id_actions_are_migrated() {
        let task = parse_one(r#"[{ "id": "A", "logic": { "onOpen": ["B", "C"] } }]"#);
        let task = task.unwrap_or_else(|| Task::new("missing"));

        let actions = task.actions_for(Trigger::OnOpen);
        let targets: Vec<&str> = actions.iter().map(|a| a.target_id.as_str()).collect();
        assert_eq!(targets, vec!["B", "C"]);
        assert!(actions.iter().all(|a| a.action_type == ActionType::Unlock));
        assert_eq!(actions.get(1).map(|a| a.id.as_str()), Some("A:onOpen:1"));
    }

    #[test]
    fn untyped_object_action_defaults_to_unlock() {
        let task = parse_one(r#"[{ "id": "A", "logic": { "onCorrect": [{ "targetId": "B" }] } }]"#);
        let task = task.unwrap_or_else(|| Task::new("missing"));
        let action = task.actions_for(Trigger::OnCorrect).first().cloned();
        assert_eq!(action.as_ref().map(|a| a.action_type), Some(ActionType::Unlock));
        assert_eq!(action.map(|a| a.id.into_inner()), Some("A:onCorrect:0".to_owned()));
    }

    #[test]
    fn unknown_triggers_are_dropped() {
        let task = parse_one(
            r#"[{ "id": "A", "logic": { "onHover": ["B"], "onIncorrect": ["C"] } }]"#,
        );
        let task = task.unwrap_or_else(|| Task::new("missing"));
        assert_eq!(task.logic.len(), 1);
        assert_eq!(task.actions_for(Trigger::OnIncorrect).len(), 1);
    }

    #[test]
    fn unknown_action_type_is_kept_inert() {
        let task = parse_one(
            r#"[{ "id": "A", "logic": { "onOpen": [{ "id": "x", "type": "confetti", "targetId": "B" }] } }]"#,
        );
        let task = task.unwrap_or_else(|| Task::new("missing"));
        let kinds: Vec<ActionType> = task
            .actions_for(Trigger::OnOpen)
            .iter()
            .map(|a| a.action_type)
            .collect();
        assert_eq!(kinds, vec![ActionType::Other]);
    }

    #[test]
    fn null_location_is_unplaced() {
        let task = parse_one(r#"[{ "id": "A", "location": null, "activationTypes": ["click", "click"] }]"#);
        let task = task.unwrap_or_else(|| Task::new("missing"));
        assert!(task.location.is_unplaced());
        assert_eq!(task.activation_types.len(), 1);
    }

    #[test]
    fn empty_id_is_rejected() {
        let result = parse_tasks(r#"[{ "id": "ok" }, { "id": "  " }]"#);
        assert!(matches!(result, Err(LoadError::EmptyTaskId { index: 1 })));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(parse_tasks("[{"), Err(LoadError::Json { .. })));
    }
}
