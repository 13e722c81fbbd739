//! Error taxonomy for wheel operations.
//!
//! Every user-triggerable failure is one of two kinds: validation problems
//! (bad input, unknown list, nothing left to draw) which abort the operation
//! with no state change, and persistence problems (store unwritable) which
//! are reported but never roll back in-memory state. Setup errors outside
//! the engine (terminal, config I/O) use anyhow at the boundary instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WheelError {
    /// Recoverable input problem, surfaced to the user as a plain message.
    #[error("{0}")]
    Validation(String),

    /// The state store could not be read or written. The in-memory state is
    /// still valid; callers report this as a warning.
    #[error("could not persist state: {0}")]
    Persistence(String),
}

impl WheelError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn persistence(msg: impl std::fmt::Display) -> Self {
        Self::Persistence(msg.to_string())
    }

    /// Whether this error leaves persisted and in-memory state diverged.
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }
}
