//! Reference host: one team's game session.
//!
//! A [`GameSession`] owns the task collection, the team context, and the
//! team's [`ScoreLedger`]. It serializes every event (GPS tick, open, scan,
//! answer, close) through the engine and commits each result as a single
//! update, so a projection never observes a half-applied mutation set.
//!
//! Events from other devices (a teammate's answer, an instructor override)
//! go through the same path with [`EventOrigin::Remote`]. The only
//! difference is that remote opens and answers skip the local reachability
//! gate, since reachability was judged on the originating device.
//!
//! # Answer pipeline
//!
//! 1. Already completed (locally or by the team): no-op.
//! 2. A local answer needs a task that is reachable now or was opened
//!    earlier in this session.
//! 3. [`completion::resolve`] decides the task's own state.
//! 4. [`logic::propagate`] fires `onCorrect` or `onIncorrect`.
//! 5. Mutations and completion are applied to a copy of the tasks.
//! 6. Points are awarded once on a correct completion.
//! 7. The copy is committed.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use geoquest_ledger::{LedgerError, ScoreLedger};
use geoquest_types::{
    ActivationType, CompletionDecision, CompletionLogic, Coordinate, PlayerContext, ProjectedTask,
    Task, TaskId, Trigger,
};

use crate::activation::ActivationEvaluator;
use crate::completion;
use crate::config::{EngineConfig, SessionConfig};
use crate::error::EngineWarning;
use crate::logic::{self, MutationSet};
use crate::projector::{self, GameStateProjector};

/// Errors returned when the session rejects an event.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The event names a task that is not in the session.
    #[error("task not found: {0}")]
    UnknownTask(TaskId),

    /// A local open or answer targeted a task the player cannot reach.
    #[error("task {0} is not reachable")]
    NotReachable(TaskId),

    /// A scan targeted a task that is not configured for QR activation.
    #[error("task {0} is not configured for QR activation")]
    QrNotConfigured(TaskId),

    /// The player tried to dismiss a task whose policy requires an answer.
    #[error("task {task_id} cannot be closed under policy {policy:?}")]
    CloseNotAllowed {
        /// The task.
        task_id: TaskId,
        /// Its completion policy.
        policy: CompletionLogic,
    },

    /// Recording the score failed.
    #[error("score ledger error: {source}")]
    Ledger {
        /// The underlying ledger error.
        #[from]
        source: LedgerError,
    },
}

/// Where an event came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventOrigin {
    /// This device.
    #[default]
    Local,
    /// Another device in the same session.
    Remote,
}

/// A discrete player or sync event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum GameEvent {
    /// A GPS update.
    Move {
        /// The new fix.
        location: Coordinate,
        /// Accuracy radius of the fix in meters.
        #[serde(default)]
        accuracy: Option<f64>,
    },
    /// The player opened a task.
    Open {
        /// The opened task.
        task_id: TaskId,
    },
    /// The player scanned a task's QR code.
    Scan {
        /// The scanned task.
        task_id: TaskId,
    },
    /// The player submitted an answer.
    Answer {
        /// The answered task.
        task_id: TaskId,
        /// Whether the answer was correct.
        correct: bool,
    },
    /// The player dismissed a task without answering.
    Close {
        /// The dismissed task.
        task_id: TaskId,
    },
}

/// Result of an answer submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum AnswerOutcome {
    /// The task was already completed; nothing changed.
    AlreadyCompleted,
    /// The answer was resolved and its effects committed.
    Resolved {
        /// The task's own post-answer state.
        decision: CompletionDecision,
        /// Effects on other tasks.
        mutations: MutationSet,
        /// Points added to the team score, if any.
        points_awarded: Option<i64>,
    },
}

/// Result of handling one [`GameEvent`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "lowercase")]
pub enum EventOutcome {
    /// The player location was updated (or a remote move was ignored).
    Moved,
    /// The task was opened (directly or by scan).
    Opened(MutationSet),
    /// An answer was handled.
    Answered(AnswerOutcome),
    /// The task was dismissed.
    Closed,
}

/// One team's game state and the event pipeline that advances it.
#[derive(Debug, Clone)]
pub struct GameSession {
    tasks: Vec<Task>,
    context: PlayerContext,
    ledger: ScoreLedger,
    projector: GameStateProjector,
    config: SessionConfig,
    warnings: Vec<EngineWarning>,
    opened: BTreeSet<TaskId>,
}

impl GameSession {
    /// Start a session over `tasks`.
    pub fn new(tasks: Vec<Task>, config: &EngineConfig) -> Self {
        let context = PlayerContext {
            editor_mode: config.session.editor_mode,
            ..PlayerContext::default()
        };
        Self::with_context(tasks, context, config)
    }

    /// Start a session with an existing team context (e.g. after a reload).
    ///
    /// Tasks already flagged completed are added to the team's completed set.
    /// A scan only counts for the event that carries it, so any
    /// `scannedTaskId` in `context` is dropped. Restore the team's score
    /// with [`GameSession::with_ledger`].
    pub fn with_context(tasks: Vec<Task>, mut context: PlayerContext, config: &EngineConfig) -> Self {
        context.scanned_task_id = None;
        context.completed_task_ids.extend(
            tasks
                .iter()
                .filter(|task| task.is_completed)
                .map(|task| task.id.clone()),
        );
        Self {
            tasks,
            context,
            ledger: ScoreLedger::new(),
            projector: GameStateProjector::new(ActivationEvaluator::new(&config.activation)),
            config: config.session.clone(),
            warnings: Vec::new(),
            opened: BTreeSet::new(),
        }
    }

    /// Replace the session's ledger with one restored from storage.
    ///
    /// Tasks the ledger has already awarded are treated as completed by the
    /// team, so they cannot score again.
    #[must_use]
    pub fn with_ledger(mut self, ledger: ScoreLedger) -> Self {
        self.context.completed_task_ids.extend(
            ledger
                .entries()
                .iter()
                .map(|entry| entry.task_id.clone()),
        );
        self.ledger = ledger;
        self
    }

    /// The current task collection.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The current team context.
    pub const fn context(&self) -> &PlayerContext {
        &self.context
    }

    /// The team's score ledger.
    pub const fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    /// The team's running score.
    pub const fn score(&self) -> i64 {
        self.ledger.total()
    }

    /// Warnings collected from every event handled so far.
    pub fn warnings(&self) -> &[EngineWarning] {
        &self.warnings
    }

    /// The per-render view of every task.
    pub fn projection(&self) -> Vec<ProjectedTask> {
        self.projector.project(&self.tasks, &self.context)
    }

    /// Dispatch an event.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if the event is rejected. A rejected event
    /// changes nothing.
    pub fn handle(&mut self, event: GameEvent, origin: EventOrigin) -> Result<EventOutcome, SessionError> {
        match event {
            GameEvent::Move { location, accuracy } => {
                if origin == EventOrigin::Remote {
                    debug!("ignoring remote location update");
                } else {
                    self.update_location(location, accuracy);
                }
                Ok(EventOutcome::Moved)
            }
            GameEvent::Open { task_id } => self.open_task(&task_id, origin).map(EventOutcome::Opened),
            GameEvent::Scan { task_id } => self.scan_qr(&task_id, origin).map(EventOutcome::Opened),
            GameEvent::Answer { task_id, correct } => self
                .submit_answer(&task_id, correct, origin)
                .map(EventOutcome::Answered),
            GameEvent::Close { task_id } => self.close_task(&task_id).map(|()| EventOutcome::Closed),
        }
    }

    /// Record a new GPS fix.
    pub fn update_location(&mut self, location: Coordinate, accuracy: Option<f64>) {
        self.context.player_location = Some(location);
        self.context.accuracy = accuracy;
    }

    /// Open a task and fire its `onOpen` logic.
    ///
    /// # Errors
    ///
    /// [`SessionError::UnknownTask`] if the task does not exist, or
    /// [`SessionError::NotReachable`] if a local open targets a task the
    /// player cannot reach.
    pub fn open_task(&mut self, task_id: &TaskId, origin: EventOrigin) -> Result<MutationSet, SessionError> {
        let task = find(&self.tasks, task_id)?;
        self.check_reachable(task, &self.context, origin)?;

        let set = logic::propagate(task_id, Trigger::OnOpen, &self.tasks);
        let tasks = projector::apply_mutations(&self.tasks, &set);
        debug!(task_id = %task_id, ?origin, mutations = set.len(), "task opened");
        self.opened.insert(task_id.clone());
        self.commit(tasks, &set);
        Ok(set)
    }

    /// Unlock a task by QR scan, then open it.
    ///
    /// # Errors
    ///
    /// [`SessionError::UnknownTask`], [`SessionError::QrNotConfigured`], or
    /// [`SessionError::NotReachable`] if the task left the active set.
    pub fn scan_qr(&mut self, task_id: &TaskId, origin: EventOrigin) -> Result<MutationSet, SessionError> {
        let task = find(&self.tasks, task_id)?;
        if !task.activates_by(ActivationType::Qr) {
            return Err(SessionError::QrNotConfigured(task_id.clone()));
        }

        let mut set = logic::scan_unlock(task_id, &self.tasks);
        let unlocked = projector::apply_mutations(&self.tasks, &set);

        let scan_context = PlayerContext {
            scanned_task_id: Some(task_id.clone()),
            ..self.context.clone()
        };
        self.check_reachable(find(&unlocked, task_id)?, &scan_context, origin)?;

        let opened = logic::propagate(task_id, Trigger::OnOpen, &unlocked);
        let tasks = projector::apply_mutations(&unlocked, &opened);
        set.extend(opened);
        debug!(task_id = %task_id, ?origin, mutations = set.len(), "task scanned");
        self.opened.insert(task_id.clone());
        self.commit(tasks, &set);
        Ok(set)
    }

    /// Submit an answer for a task.
    ///
    /// A local answer is accepted for a task that is reachable now or was
    /// opened earlier in this session (the player may have walked out of
    /// the geofence while answering).
    ///
    /// # Errors
    ///
    /// [`SessionError::UnknownTask`] if the task does not exist,
    /// [`SessionError::NotReachable`] if a local answer targets a task the
    /// player never had access to, or [`SessionError::Ledger`] if the score
    /// cannot be recorded.
    pub fn submit_answer(
        &mut self,
        task_id: &TaskId,
        correct: bool,
        origin: EventOrigin,
    ) -> Result<AnswerOutcome, SessionError> {
        let task = find(&self.tasks, task_id)?;
        if task.is_completed || self.context.has_completed(task_id) {
            debug!(task_id = %task_id, "answer for completed task ignored");
            return Ok(AnswerOutcome::AlreadyCompleted);
        }
        if !self.opened.contains(task_id) {
            self.check_reachable(task, &self.context, origin)?;
        }

        let decision = completion::resolve(task, correct);
        let points = task.points;
        let set = logic::propagate(task_id, Trigger::for_answer(correct), &self.tasks);
        let tasks = projector::apply_mutations(&self.tasks, &set);
        let tasks = projector::apply_completion(&tasks, task_id, decision);

        let points_awarded = if completion::awards_points(decision, correct) {
            self.ledger.award(task_id, points)?.map(|entry| entry.points)
        } else {
            None
        };

        if decision.should_mark_completed {
            self.context.completed_task_ids.insert(task_id.clone());
        }
        debug!(
            task_id = %task_id,
            correct,
            completed = decision.should_mark_completed,
            mutations = set.len(),
            ?points_awarded,
            "answer resolved"
        );
        self.commit(tasks, &set);

        Ok(AnswerOutcome::Resolved {
            decision,
            mutations: set,
            points_awarded,
        })
    }

    /// Dismiss a task without answering.
    ///
    /// Leaves the task in its pre-answer state and fires no logic.
    ///
    /// # Errors
    ///
    /// [`SessionError::UnknownTask`] if the task does not exist, or
    /// [`SessionError::CloseNotAllowed`] if its policy requires an answer.
    pub fn close_task(&self, task_id: &TaskId) -> Result<(), SessionError> {
        let task = find(&self.tasks, task_id)?;
        if task.completion_logic.allows_close() {
            debug!(task_id = %task_id, "task closed");
            Ok(())
        } else {
            Err(SessionError::CloseNotAllowed {
                task_id: task_id.clone(),
                policy: task.completion_logic,
            })
        }
    }

    fn check_reachable(
        &self,
        task: &Task,
        context: &PlayerContext,
        origin: EventOrigin,
    ) -> Result<(), SessionError> {
        if origin == EventOrigin::Remote || !self.config.require_reachable {
            return Ok(());
        }
        if self.projector.project_task(task, context).reachable {
            Ok(())
        } else {
            Err(SessionError::NotReachable(task.id.clone()))
        }
    }

    fn commit(&mut self, tasks: Vec<Task>, set: &MutationSet) {
        self.tasks = tasks;
        self.warnings.extend_from_slice(set.warnings());
    }
}

fn find<'a>(tasks: &'a [Task], task_id: &TaskId) -> Result<&'a Task, SessionError> {
    tasks
        .iter()
        .find(|task| &task.id == task_id)
        .ok_or_else(|| SessionError::UnknownTask(task_id.clone()))
}

#[cfg(test)]
mod tests {
    use geoquest_types::{Action, ActionId, ActionType};

    use super::*;

    fn clickable(id: &str, policy: CompletionLogic, points: i64) -> Task {
        let mut task = Task::new(id);
        task.activation_types.insert(ActivationType::Click);
        task.completion_logic = policy;
        task.points = points;
        task
    }

    fn unlock_on(task: &mut Task, trigger: Trigger, target: &str) {
        task.logic.entry(trigger).or_default().push(Action {
            id: ActionId::new(format!("{}-{target}", task.id)),
            action_type: ActionType::Unlock,
            target_id: TaskId::from(target),
        });
    }

    fn session(tasks: Vec<Task>) -> GameSession {
        GameSession::new(tasks, &EngineConfig::default())
    }

    fn id(key: &str) -> TaskId {
        TaskId::from(key)
    }

    fn unlocked(session: &GameSession, key: &str) -> bool {
        session
            .tasks()
            .iter()
            .any(|task| task.id.as_str() == key && task.is_unlocked)
    }

    #[test]
    fn correct_answer_unlocks_and_scores() {
        let mut a = clickable("A", CompletionLogic::KeepUntilCorrect, 10);
        unlock_on(&mut a, Trigger::OnCorrect, "B");
        let mut game = session(vec![a, clickable("B", CompletionLogic::KeepUntilCorrect, 5)]);

        let outcome = game.submit_answer(&id("A"), true, EventOrigin::Local);
        assert!(matches!(
            outcome,
            Ok(AnswerOutcome::Resolved { points_awarded: Some(10), .. })
        ));
        assert!(unlocked(&game, "B"));
        assert_eq!(game.score(), 10);
        assert!(game.context().has_completed(&id("A")));
    }

    #[test]
    fn incorrect_answer_fires_on_incorrect_only() {
        let mut a = clickable("A", CompletionLogic::KeepUntilCorrect, 10);
        unlock_on(&mut a, Trigger::OnCorrect, "B");
        unlock_on(&mut a, Trigger::OnIncorrect, "C");
        let mut game = session(vec![
            a,
            clickable("B", CompletionLogic::KeepUntilCorrect, 0),
            clickable("C", CompletionLogic::KeepUntilCorrect, 0),
        ]);

        let outcome = game.submit_answer(&id("A"), false, EventOrigin::Local);
        assert!(matches!(
            outcome,
            Ok(AnswerOutcome::Resolved { points_awarded: None, .. })
        ));
        assert!(!unlocked(&game, "B"));
        assert!(unlocked(&game, "C"));
        assert_eq!(game.score(), 0);
        assert!(!game.context().has_completed(&id("A")));
    }

    #[test]
    fn second_answer_after_completion_is_noop() {
        let mut a = clickable("A", CompletionLogic::KeepAlways, 7);
        unlock_on(&mut a, Trigger::OnCorrect, "B");
        let mut game = session(vec![a, clickable("B", CompletionLogic::RemoveAny, 0)]);

        let _ = game.submit_answer(&id("A"), true, EventOrigin::Local);
        let again = game.submit_answer(&id("A"), true, EventOrigin::Local);

        assert!(matches!(again, Ok(AnswerOutcome::AlreadyCompleted)));
        assert_eq!(game.score(), 7);
        assert_eq!(game.ledger().len(), 1);
    }

    #[test]
    fn open_fires_on_open_logic() {
        let mut a = clickable("A", CompletionLogic::KeepUntilCorrect, 0);
        unlock_on(&mut a, Trigger::OnOpen, "B");
        let mut game = session(vec![a, Task::new("B")]);

        let set = game.open_task(&id("A"), EventOrigin::Local);
        assert_eq!(set.map(|s| s.len()).ok(), Some(1));
        assert!(unlocked(&game, "B"));
    }

    #[test]
    fn local_open_requires_reachability() {
        let mut far = Task::new("far");
        far.activation_types.insert(ActivationType::Radius);
        far.location = Coordinate::new(10.0, 10.0);
        far.radius_meters = 20.0;
        unlock_on(&mut far, Trigger::OnOpen, "B");
        let mut game = session(vec![far, Task::new("B")]);

        let local = game.open_task(&id("far"), EventOrigin::Local);
        assert!(matches!(local, Err(SessionError::NotReachable(_))));
        assert!(!unlocked(&game, "B"));

        let remote = game.open_task(&id("far"), EventOrigin::Remote);
        assert!(remote.is_ok());
        assert!(unlocked(&game, "B"));
    }

    #[test]
    fn unknown_task_is_rejected() {
        let mut game = session(vec![]);
        assert!(matches!(
            game.open_task(&id("nope"), EventOrigin::Local),
            Err(SessionError::UnknownTask(_))
        ));
        assert!(matches!(
            game.submit_answer(&id("nope"), true, EventOrigin::Local),
            Err(SessionError::UnknownTask(_))
        ));
    }

    #[test]
    fn scan_reveals_hidden_qr_task_and_opens_it() {
        let mut hidden = Task::new("Q");
        hidden.activation_types.insert(ActivationType::Qr);
        hidden.is_hidden_before_scan = true;
        unlock_on(&mut hidden, Trigger::OnOpen, "B");
        let mut game = session(vec![hidden, Task::new("B")]);

        let before = game.projection();
        assert!(before.iter().all(|p| p.task_id.as_str() != "Q" || !p.visible));

        let set = game.scan_qr(&id("Q"), EventOrigin::Local);
        assert_eq!(set.map(|s| s.len()).ok(), Some(2));
        assert!(unlocked(&game, "Q"));
        assert!(unlocked(&game, "B"));
        assert!(game.context().scanned_task_id.is_none());
    }

    #[test]
    fn scan_requires_qr_activation() {
        let mut game = session(vec![clickable("A", CompletionLogic::KeepUntilCorrect, 0)]);
        assert!(matches!(
            game.scan_qr(&id("A"), EventOrigin::Local),
            Err(SessionError::QrNotConfigured(_))
        ));
        assert!(!unlocked(&game, "A"));
    }

    #[test]
    fn close_only_for_allow_close() {
        let game = session(vec![
            clickable("open", CompletionLogic::AllowClose, 0),
            clickable("strict", CompletionLogic::KeepUntilCorrect, 0),
        ]);
        let before = game.tasks().to_vec();
        assert!(game.close_task(&id("open")).is_ok());
        assert!(matches!(
            game.close_task(&id("strict")),
            Err(SessionError::CloseNotAllowed { .. })
        ));
        assert_eq!(game.tasks(), before.as_slice());
    }

    #[test]
    fn remote_answer_goes_through_same_path() {
        let mut a = clickable("A", CompletionLogic::RemoveAny, 3);
        unlock_on(&mut a, Trigger::OnCorrect, "B");
        let mut game = session(vec![a, Task::new("B")]);

        let outcome = game.handle(
            GameEvent::Answer {
                task_id: id("A"),
                correct: true,
            },
            EventOrigin::Remote,
        );
        assert!(matches!(outcome, Ok(EventOutcome::Answered(_))));
        assert!(unlocked(&game, "B"));
        assert_eq!(game.score(), 3);
    }

    #[test]
    fn remote_move_does_not_relocate_player() {
        let mut game = session(vec![]);
        let _ = game.handle(
            GameEvent::Move {
                location: Coordinate::new(1.0, 2.0),
                accuracy: None,
            },
            EventOrigin::Remote,
        );
        assert!(game.context().player_location.is_none());

        let _ = game.handle(
            GameEvent::Move {
                location: Coordinate::new(1.0, 2.0),
                accuracy: Some(4.0),
            },
            EventOrigin::Local,
        );
        assert_eq!(game.context().player_location, Some(Coordinate::new(1.0, 2.0)));
    }

    #[test]
    fn dangling_warnings_are_collected() {
        let mut a = clickable("A", CompletionLogic::KeepUntilCorrect, 0);
        unlock_on(&mut a, Trigger::OnOpen, "ghost");
        let mut game = session(vec![a]);

        let set = game.open_task(&id("A"), EventOrigin::Local);
        assert!(set.is_ok_and(|s| s.is_empty()));
        assert_eq!(game.warnings().len(), 1);
    }

    fn hidden_qr(id: &str, points: i64) -> Task {
        let mut task = Task::new(id);
        task.activation_types.insert(ActivationType::Qr);
        task.is_hidden_before_scan = true;
        task.points = points;
        task
    }

    #[test]
    fn local_answer_requires_access_to_task() {
        let mut game = session(vec![hidden_qr("H", 50)]);

        let outcome = game.submit_answer(&id("H"), true, EventOrigin::Local);
        assert!(matches!(outcome, Err(SessionError::NotReachable(_))));
        assert_eq!(game.score(), 0);
        assert!(game.tasks().iter().all(|t| !t.is_completed));
        assert!(!game.context().has_completed(&id("H")));

        assert!(game.scan_qr(&id("H"), EventOrigin::Local).is_ok());
        let outcome = game.submit_answer(&id("H"), true, EventOrigin::Local);
        assert!(matches!(
            outcome,
            Ok(AnswerOutcome::Resolved { points_awarded: Some(50), .. })
        ));
    }

    #[test]
    fn remote_answer_skips_access_check() {
        let mut game = session(vec![hidden_qr("H", 50)]);
        let outcome = game.submit_answer(&id("H"), true, EventOrigin::Remote);
        assert!(outcome.is_ok());
        assert_eq!(game.score(), 50);
    }

    #[test]
    fn opened_task_can_be_answered_after_leaving_geofence() {
        let mut fenced = Task::new("F");
        fenced.activation_types.insert(ActivationType::Radius);
        fenced.location = Coordinate::new(47.0, 8.0);
        fenced.radius_meters = 30.0;
        fenced.points = 4;
        let mut game = session(vec![fenced]);

        game.update_location(Coordinate::new(47.0, 8.0), None);
        assert!(game.open_task(&id("F"), EventOrigin::Local).is_ok());
        game.update_location(Coordinate::new(47.01, 8.0), None);

        assert!(game.submit_answer(&id("F"), true, EventOrigin::Local).is_ok());
        assert_eq!(game.score(), 4);
    }

    #[test]
    fn reloaded_session_keeps_score() {
        let mut ledger = ScoreLedger::new();
        let _ = ledger.award(&id("A"), 10);
        let mut done = clickable("A", CompletionLogic::KeepAlways, 10);
        done.is_completed = true;

        let mut game = GameSession::with_context(
            vec![done, clickable("B", CompletionLogic::KeepUntilCorrect, 5)],
            PlayerContext::default(),
            &EngineConfig::default(),
        )
        .with_ledger(ledger);

        assert_eq!(game.score(), 10);
        assert!(matches!(
            game.submit_answer(&id("A"), true, EventOrigin::Local),
            Ok(AnswerOutcome::AlreadyCompleted)
        ));
        let _ = game.submit_answer(&id("B"), true, EventOrigin::Local);
        assert_eq!(game.score(), 15);
    }

    #[test]
    fn restored_ledger_blocks_awarded_tasks() {
        let mut ledger = ScoreLedger::new();
        let _ = ledger.award(&id("A"), 10);
        let mut game =
            session(vec![clickable("A", CompletionLogic::KeepAlways, 10)]).with_ledger(ledger);

        assert!(game.context().has_completed(&id("A")));
        assert!(matches!(
            game.submit_answer(&id("A"), true, EventOrigin::Local),
            Ok(AnswerOutcome::AlreadyCompleted)
        ));
        assert_eq!(game.ledger().len(), 1);
    }

    #[test]
    fn restored_context_drops_stale_scan() {
        let context = PlayerContext {
            scanned_task_id: Some(id("Q")),
            ..PlayerContext::default()
        };
        let mut qr = Task::new("Q");
        qr.activation_types.insert(ActivationType::Qr);
        let mut game = GameSession::with_context(vec![qr], context, &EngineConfig::default());

        assert!(game.context().scanned_task_id.is_none());
        assert!(matches!(
            game.open_task(&id("Q"), EventOrigin::Local),
            Err(SessionError::NotReachable(_))
        ));
    }

    #[test]
    fn game_event_wire_format() {
        let event: Result<GameEvent, _> =
            serde_json::from_str(r#"{ "kind": "answer", "taskId": "A", "correct": true }"#);
        assert_eq!(
            event.ok(),
            Some(GameEvent::Answer {
                task_id: id("A"),
                correct: true
            })
        );
    }
}
