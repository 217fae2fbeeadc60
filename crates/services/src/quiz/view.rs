use chrono::Duration;

use lifeskills_core::model::{AnswerValue, Question, QuizPhase, SessionId, Skill};
use lifeskills_core::scoring::ScoreResult;

/// Snapshot of a session for rendering.
///
/// `position` is 1-based and `0` outside `InProgress`. `results` is filled only once
/// the session is completed, in catalog skill order. `skills` lists the running
/// catalog's skills in the same order, in every phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizView {
    pub session_id: SessionId,
    pub phase: QuizPhase,
    pub question: Option<Question>,
    pub position: usize,
    pub total: usize,
    pub answered: usize,
    pub highlighted: Option<AnswerValue>,
    pub elapsed: Option<Duration>,
    pub results: Vec<ScoreResult>,
    pub skills: Vec<Skill>,
}

impl QuizView {
    /// Share of the quiz reached, counting the current question, in `0.0..=1.0`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = self.position as f64 / self.total as f64;
        ratio.clamp(0.0, 1.0)
    }

    /// True between an answer and its delayed advance.
    #[must_use]
    pub fn is_input_locked(&self) -> bool {
        self.highlighted.is_some()
    }
}
