//! The labyrinth game engine.
//!
//! - [`types`]: rooms, directions, items, player state, flags, thread code
//! - [`graph`]: the mutable room/exit graph
//! - [`counters`]: the three virtual rooms and their reversible counters
//! - [`history`]: back-navigation stack
//! - [`rules`]: what happens when a room is entered
//! - [`encounter`]: NPC placement, dialogue and combat, hazard rooms
//! - [`boss`]: the Minotaur
//! - [`artefact`]: treasure and the depleting name pool
//! - [`commands`]: input parsing
//! - [`session`]: the turn controller
//! - [`render`]: terminal output

pub mod artefact;
pub mod boss;
pub mod commands;
pub mod counters;
pub mod encounter;
pub mod errors;
pub mod graph;
pub mod history;
pub mod render;
pub mod rules;
pub mod session;
pub mod types;

pub use commands::{parse_command, Command};
pub use errors::TurnError;
pub use session::{DeathCause, Session, TurnReport, TurnStatus};
