//! Error types for checkpoint commands.
//!
//! Command failures are never fatal. Their `Display` text is exactly what the
//! invoking player is told.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("No Such Player: {0}")]
    NoSuchPlayer(String),

    #[error("You do not have permission to reset others spawn positions")]
    ResetOthersDenied,

    #[error("You do not have permission to reset all spawn positions")]
    ResetAllDenied,

    /// The invoker vanished from the directory mid-command.
    #[error("Unknown player")]
    UnknownInvoker,
}
