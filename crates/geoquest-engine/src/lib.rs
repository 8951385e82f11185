//! Task activation, logic-graph propagation, and game state projection for
//! GeoQuest.
//!
//! The engine decides, for each task in a game and each moment of play,
//! whether the task is visible, whether the player can open it, and what
//! happens to the rest of the game when the player opens or answers it.
//! Every operation is a pure function over immutable snapshots; the
//! reference host in [`session`] is the only place state is committed.
//!
//! # Modules
//!
//! - [`activation`] -- Per-task visibility and reachability.
//! - [`audit`] -- Data-quality findings over a whole task set.
//! - [`completion`] -- Completion policies applied to an answered task.
//! - [`config`] -- Configuration loading from `geoquest-config.yaml`.
//! - [`error`] -- Non-fatal [`EngineWarning`] findings.
//! - [`geo`] -- Great-circle distance and geofence tests.
//! - [`load`] -- Normalization of stored task records.
//! - [`logic`] -- Single-hop action propagation into a [`MutationSet`].
//! - [`projector`] -- Per-render projection and mutation application.
//! - [`session`] -- [`GameSession`], the event pipeline for one team.
//!
//! [`MutationSet`]: logic::MutationSet
//! [`GameSession`]: session::GameSession

pub mod activation;
pub mod audit;
pub mod completion;
pub mod config;
pub mod error;
pub mod geo;
pub mod load;
pub mod logic;
pub mod projector;
pub mod session;

// Re-export primary types at crate root.
pub use activation::ActivationEvaluator;
pub use audit::audit;
pub use completion::resolve;
pub use config::{ConfigError, EngineConfig};
pub use error::EngineWarning;
pub use geo::distance_meters;
pub use load::{LoadError, TaskRecord, parse_tasks};
pub use logic::{MutationSet, propagate, scan_unlock};
pub use projector::{GameStateProjector, apply_completion, apply_mutations};
pub use session::{AnswerOutcome, EventOrigin, EventOutcome, GameEvent, GameSession, SessionError};
