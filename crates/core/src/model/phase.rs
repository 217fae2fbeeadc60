use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a quiz session.
///
/// `NotStarted -> InProgress -> Completed`, with restart returning to `NotStarted`
/// from any phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizPhase {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl QuizPhase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuizPhase::NotStarted => "not_started",
            QuizPhase::InProgress => "in_progress",
            QuizPhase::Completed => "completed",
        }
    }

    #[must_use]
    pub fn is_in_progress(self) -> bool {
        matches!(self, QuizPhase::InProgress)
    }

    #[must_use]
    pub fn is_completed(self) -> bool {
        matches!(self, QuizPhase::Completed)
    }
}

impl fmt::Display for QuizPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
