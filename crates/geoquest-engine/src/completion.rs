//! Completion policies: what an answer does to the task that was answered.
//!
//! | Policy | Correct | Incorrect |
//! |--------|---------|-----------|
//! | `remove_any` | completed, removed | completed, removed |
//! | `keep_until_correct` | completed, removed | open, visible |
//! | `keep_always` | completed, visible | open, visible |
//! | `allow_close` | unchanged, visible | unchanged, visible |
//!
//! [`resolve`] is pure, so calling it again for the same task returns the
//! same decision. Awarding points and firing `onCorrect` exactly once is the
//! host's job: it must check `isCompleted` before acting on a decision.

use geoquest_types::{CompletionDecision, CompletionLogic, Task};

/// Decide the answered task's own post-answer state.
pub const fn resolve(task: &Task, answered_correctly: bool) -> CompletionDecision {
    match task.completion_logic {
        CompletionLogic::RemoveAny => CompletionDecision {
            should_remain_visible: false,
            should_mark_completed: true,
        },
        CompletionLogic::KeepUntilCorrect => CompletionDecision {
            should_remain_visible: !answered_correctly,
            should_mark_completed: answered_correctly,
        },
        CompletionLogic::KeepAlways => CompletionDecision {
            should_remain_visible: true,
            should_mark_completed: answered_correctly,
        },
        CompletionLogic::AllowClose => CompletionDecision {
            should_remain_visible: true,
            should_mark_completed: false,
        },
    }
}

/// Whether a correct answer under this decision earns the task's points.
pub const fn awards_points(decision: CompletionDecision, answered_correctly: bool) -> bool {
    decision.should_mark_completed && answered_correctly
}
