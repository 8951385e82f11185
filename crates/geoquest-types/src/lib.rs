//! Shared type definitions for the GeoQuest task engine.
//!
//! This crate is the single source of truth for the records exchanged
//! between the engine and its host (UI, backing store, replay tooling).
//! Types defined here flow downstream to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe identifier wrappers for tasks, actions, and ledger entries
//! - [`enums`] -- Activation methods, completion policies, triggers, action kinds
//! - [`structs`] -- Tasks, actions, player context, and engine outputs

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{ActionType, ActivationType, CompletionLogic, MutationKind, Trigger};
pub use ids::{ActionId, ScoreEntryId, TaskId};
pub use structs::{
    Action, Activation, CompletionDecision, Coordinate, Mutation, PlayerContext, ProjectedTask,
    ScoreEntry, Task,
};
