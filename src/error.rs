//! Error taxonomy for the stepping machines.
//!
//! Every variant is local and recoverable: a driver is expected to disable or
//! ignore the offending control, never to abort.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Reserved for future input validation. No input is currently rejected:
    /// any string, including the empty one, is a legal pattern or text.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The matcher was given a π array whose length disagrees with the
    /// pattern length.
    #[error("prefix function has length {got}, pattern has length {expected}")]
    PrecomputationRequired { expected: usize, got: usize },

    /// `step_back` was called with an empty history.
    #[error("no history to step back to")]
    NoHistory,

    /// Strict-mode `step` after the machine reached its terminal state. The
    /// lenient default treats this as a silent no-op.
    #[error("step called after terminal state")]
    StepAfterTerminal,

    /// `step` was called while a match awaits acknowledgement. Acknowledge it
    /// first so the scan cannot advance past an unobserved match.
    #[error("a match is pending acknowledgement")]
    MatchPending,
}
