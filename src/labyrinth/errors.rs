use serde::Serialize;
use thiserror::Error;

/// Reasons a command was refused. None of these end the game; the state is
/// left as it was and the player is asked again.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum TurnError {
    /// No exit leads that way, or the word is not a direction at all.
    #[error("There is no door!")]
    InvalidDirection(String),

    /// A monster or the Minotaur stands in the way.
    #[error("{0}")]
    BlockedByHazard(String),

    /// The command needs a target or argument that was not given.
    #[error("{0}")]
    MissingArgument(String),

    /// `back` refused: empty history, a one-way passage, or the arena gate.
    #[error("{0}")]
    IllegalBackNavigation(String),

    /// The first word is not a known command.
    #[error("I don't know what you mean...")]
    UnknownCommand(String),

    /// The command was understood but there is nothing here to act upon.
    #[error("{0}")]
    NoEffect(String),
}
