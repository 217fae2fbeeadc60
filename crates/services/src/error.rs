//! Shared error types for the services crate.

use thiserror::Error;

use lifeskills_core::model::QuizPhase;

/// Rejections from `QuizSession`.
///
/// A rejected call leaves the session untouched. `QuizLoop` logs and drops these, since
/// they usually come from stale timers or repeated key presses.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("{action} is not allowed while the quiz is {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: QuizPhase,
    },
    #[error("answer value must be between 1 and 4, got {0}")]
    OutOfRangeAnswer(u8),
    #[error("previous answer is still advancing")]
    AdvancePending,
    #[error("advance ticket {ticket} is no longer pending")]
    StaleAdvance { ticket: u64 },
}
