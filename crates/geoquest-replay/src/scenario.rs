//! Scenario scripts and their replay.
//!
//! A scenario is a JSON document with four parts: the task records as the
//! backing store holds them, an optional starting team context, the team's
//! persisted score entries, and an ordered list of events. [`replay`] feeds
//! the events through a [`GameSession`] and collects a [`ReplayReport`].
//!
//! ```json
//! {
//!   "tasks": [{ "id": "A", "activationTypes": ["click"], "points": 5 }],
//!   "events": [
//!     { "kind": "open", "taskId": "A" },
//!     { "kind": "answer", "taskId": "A", "correct": true, "origin": "remote" }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use geoquest_engine::load::{self, TaskRecord};
use geoquest_engine::{EngineConfig, EngineWarning, EventOrigin, GameEvent, GameSession, audit};
use geoquest_ledger::ScoreLedger;
use geoquest_types::{PlayerContext, ProjectedTask, ScoreEntry};

use crate::error::ReplayError;

/// A scripted game.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Task records in storage form.
    pub tasks: Vec<TaskRecord>,
    /// Starting team context.
    #[serde(default)]
    pub context: PlayerContext,
    /// Score entries persisted before the reload.
    #[serde(default)]
    pub ledger: Vec<ScoreEntry>,
    /// Events in the order they are handled.
    #[serde(default)]
    pub events: Vec<ScriptedEvent>,
}

/// One event in a scenario, with the device it came from.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptedEvent {
    /// The event itself.
    #[serde(flatten)]
    pub event: GameEvent,
    /// Where the event came from; local when omitted.
    #[serde(default)]
    pub origin: EventOrigin,
}

/// An event the session refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedEvent {
    /// Position of the event in the script.
    pub index: usize,
    /// Why it was rejected.
    pub reason: String,
}

/// Final state after replaying a scenario.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    /// The team's final score.
    pub score: i64,
    /// Every score award, in order.
    pub ledger: ScoreLedger,
    /// The final per-task view.
    pub projection: Vec<ProjectedTask>,
    /// Load-time audit findings plus warnings raised during play.
    pub warnings: Vec<EngineWarning>,
    /// Events the session refused.
    pub rejected: Vec<RejectedEvent>,
}

/// Replay a scenario and report the outcome.
///
/// # Errors
///
/// Returns [`ReplayError::Load`] if the task records cannot be normalized,
/// or [`ReplayError::Ledger`] if the persisted score entries are
/// inconsistent. Rejected events do not stop the replay.
pub fn replay(scenario: Scenario, config: &EngineConfig) -> Result<ReplayReport, ReplayError> {
    let tasks = load::normalize(scenario.tasks)?;
    let mut warnings = audit(&tasks);
    info!(tasks = tasks.len(), events = scenario.events.len(), "scenario loaded");

    let mut context = scenario.context;
    context.editor_mode |= config.session.editor_mode;
    let ledger = ScoreLedger::from_entries(scenario.ledger)?;
    let mut session = GameSession::with_context(tasks, context, config).with_ledger(ledger);
    let mut rejected = Vec::new();

    for (index, scripted) in scenario.events.into_iter().enumerate() {
        if let Err(e) = session.handle(scripted.event, scripted.origin) {
            warn!(index, origin = ?scripted.origin, error = %e, "event rejected");
            rejected.push(RejectedEvent {
                index,
                reason: e.to_string(),
            });
        }
    }

    warnings.extend_from_slice(session.warnings());
    info!(
        score = session.score(),
        rejected = rejected.len(),
        warnings = warnings.len(),
        "scenario replayed"
    );

    Ok(ReplayReport {
        score: session.score(),
        ledger: session.ledger().clone(),
        projection: session.projection(),
        warnings,
        rejected,
    })
}

/// Parse a scenario from JSON text.
///
/// # Errors
///
/// Returns [`ReplayError::Json`] if the text is not a valid scenario.
pub fn parse(json: &str) -> Result<Scenario, ReplayError> {
    Ok(serde_json::from_str(json)?)
}
