//! # Labyrinth - a text adventure through the Labyrinth of Daedalus
//!
//! Find Ariadna's Thread, arm yourself, slay the Minotaur at the centre and
//! walk back out. The labyrinth shifts as you learn its secrets: doors
//! appear and vanish, and three of its rooms are endless loops tracked by
//! hidden counters.
//!
//! ## Quick Start
//!
//! ```rust
//! use labyrinth::config::GameConfig;
//! use labyrinth::labyrinth::{parse_command, Session, TurnStatus};
//!
//! let mut session = Session::new(&GameConfig::default(), 42);
//! let report = session.play_turn(&parse_command("go north"));
//! assert_eq!(report.status, TurnStatus::Continue);
//! ```
//!
//! ## Module Organization
//!
//! - [`labyrinth`] - the game engine: rooms, counters, history, encounters, turns
//! - [`config`] - configuration management
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   CLI / REPL    │ ← stdin lines, rendered text or JSON out
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │    Session      │ ← one command per turn
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │ Graph, counters │ ← rooms, virtual rooms, history
//! │ rules, NPCs     │
//! └─────────────────┘
//! ```

pub mod config;
pub mod labyrinth;
