//! Enumeration types for the GeoQuest task engine.
//!
//! Wire names follow the backing store's record format: activation and
//! action types are lowercase, completion policies are `snake_case`, and
//! triggers are `camelCase` (`onOpen`, `onCorrect`, `onIncorrect`).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Activation
// ---------------------------------------------------------------------------

/// A method by which a task becomes attemptable.
///
/// A task may configure several; it is reachable when any one of them
/// currently succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum ActivationType {
    /// Geofence: the player must be within the task's radius.
    Radius,
    /// Tap-to-open: eligible whenever the task is visible.
    Click,
    /// Scan-to-unlock: eligible only as the direct result of a QR scan.
    Qr,
}

// ---------------------------------------------------------------------------
// Completion policy
// ---------------------------------------------------------------------------

/// What happens to a task after an answer is submitted.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum CompletionLogic {
    /// One-shot: completed and removed after any answer.
    RemoveAny,
    /// Completed and removed only after a correct answer; retriable otherwise.
    #[default]
    KeepUntilCorrect,
    /// Stays on the map even once completed (reference/info tasks).
    KeepAlways,
    /// May be dismissed without answering; answers leave it untouched.
    AllowClose,
}

impl CompletionLogic {
    /// Whether the player may dismiss the task without answering it.
    pub const fn allows_close(self) -> bool {
        matches!(self, Self::AllowClose)
    }

    /// Whether a completed task stays in the visible set.
    pub const fn keeps_completed_visible(self) -> bool {
        matches!(self, Self::KeepAlways)
    }
}

// ---------------------------------------------------------------------------
// Logic graph
// ---------------------------------------------------------------------------

/// The event that fires a task's outgoing actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum Trigger {
    /// The player opened the task.
    OnOpen,
    /// The player answered the task correctly.
    OnCorrect,
    /// The player answered the task incorrectly.
    OnIncorrect,
}

impl Trigger {
    /// All recognized triggers, in declaration order.
    pub const ALL: [Self; 3] = [Self::OnOpen, Self::OnCorrect, Self::OnIncorrect];

    /// The wire name of this trigger.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OnOpen => "onOpen",
            Self::OnCorrect => "onCorrect",
            Self::OnIncorrect => "onIncorrect",
        }
    }

    /// Parse a wire name, returning `None` for unrecognized keys.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|trigger| trigger.as_str() == key)
    }

    /// The trigger fired by an answer with the given correctness.
    pub const fn for_answer(correct: bool) -> Self {
        if correct { Self::OnCorrect } else { Self::OnIncorrect }
    }
}

impl core::fmt::Display for Trigger {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of a logic action.
///
/// Only [`ActionType::Unlock`] and [`ActionType::Reveal`] participate in
/// propagation. Any other type found in a record deserializes to
/// [`ActionType::Other`] and is inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum ActionType {
    /// Unlock the target task.
    Unlock,
    /// Reveal a target hidden before scan. Same flag as unlock.
    Reveal,
    /// Any action type this engine does not act on. Never written by
    /// editors, so it is left out of the generated bindings.
    #[serde(other)]
    #[ts(skip)]
    Other,
}

impl ActionType {
    /// The mutation this action produces, if it propagates at all.
    pub const fn mutation(self) -> Option<MutationKind> {
        match self {
            Self::Unlock => Some(MutationKind::Unlock),
            Self::Reveal => Some(MutationKind::Reveal),
            Self::Other => None,
        }
    }
}

/// A state change applied to a target task by propagation.
///
/// Both kinds set `isUnlocked`; they stay distinct so the editor can show
/// which intent the organizer configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum MutationKind {
    /// Set `isUnlocked` on the target.
    Unlock,
    /// Set `isUnlocked` on a target hidden before scan.
    Reveal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_wire_names() {
        for trigger in Trigger::ALL {
            let json = serde_json::to_string(&trigger).ok();
            assert_eq!(json, Some(format!("\"{}\"", trigger.as_str())));
            assert_eq!(Trigger::from_key(trigger.as_str()), Some(trigger));
        }
        assert_eq!(Trigger::from_key("onHover"), None);
    }

    #[test]
    fn completion_logic_wire_names() {
        let parsed: Result<CompletionLogic, _> = serde_json::from_str("\"keep_until_correct\"");
        assert_eq!(parsed.ok(), Some(CompletionLogic::KeepUntilCorrect));
        let parsed: Result<CompletionLogic, _> = serde_json::from_str("\"allow_close\"");
        assert_eq!(parsed.ok(), Some(CompletionLogic::AllowClose));
    }

    #[test]
    fn unknown_action_type_is_inert() {
        let parsed: Result<ActionType, _> = serde_json::from_str("\"teleport\"");
        assert_eq!(parsed.ok(), Some(ActionType::Other));
        assert_eq!(ActionType::Other.mutation(), None);
        assert_eq!(ActionType::Reveal.mutation(), Some(MutationKind::Reveal));
    }

    #[test]
    fn bindings_offer_only_writable_action_types() {
        use ts_rs::TS;

        let binding = ActionType::inline();
        assert!(binding.contains("\"unlock\""));
        assert!(binding.contains("\"reveal\""));
        assert!(!binding.contains("other"));
    }

    #[test]
    fn only_keep_always_keeps_completed_visible() {
        assert!(CompletionLogic::KeepAlways.keeps_completed_visible());
        assert!(!CompletionLogic::RemoveAny.keeps_completed_visible());
        assert!(!CompletionLogic::KeepUntilCorrect.keeps_completed_visible());
        assert!(!CompletionLogic::AllowClose.keeps_completed_visible());
        assert!(CompletionLogic::AllowClose.allows_close());
    }
}
