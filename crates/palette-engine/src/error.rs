//! Engine error types.

use std::{error::Error as StdError, io, process::ExitStatus, result::Result as StdResult};

use thiserror::Error;

/// Convenient result type for the engine crate.
pub type Result<T> = StdResult<T, Error>;

/// Configuration and registration errors surfaced when a palette is built.
///
/// Navigation misuse is never an error; invalid transitions are no-ops.
#[derive(Debug, Error)]
pub enum Error {
    /// The hotkey spec could not be parsed into a single primary-modifier chord.
    #[error("Invalid hotkey '{spec}': {reason}")]
    InvalidHotkey {
        /// The spec as supplied.
        spec: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The hotkey backend refused a registration or removal.
    #[error("Hotkey registration error: {0}")]
    Hotkey(String),

    /// No active registration exists for the provided id.
    #[error("Invalid registration id")]
    InvalidRegistration,
}

/// Failure raised by a command's action.
#[derive(Debug, Error)]
pub enum ActionError {
    /// Free-form failure message.
    #[error("{0}")]
    Message(String),

    /// I/O failure while running the action.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A spawned process finished unsuccessfully.
    #[error("Command exited with {0}")]
    Exit(ExitStatus),

    /// Any other error type.
    #[error("{0}")]
    Other(Box<dyn StdError + Send + Sync>),
}

impl ActionError {
    /// Build a message error.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}
