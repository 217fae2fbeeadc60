use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

use lifeskills_core::Clock;
use lifeskills_core::model::{
    AnswerSet, AnswerValue, Question, QuizPhase, QuizSettings, SessionId,
};
use lifeskills_core::scoring::{ScoreResult, score_all};

use super::bank::QuestionBank;
use super::view::QuizView;
use crate::error::QuizError;

//
// ─── ADVANCE ───────────────────────────────────────────────────────────────────
//

/// Handle for the single delayed advance a session may have outstanding.
///
/// Tickets are never reused within a session, even across restarts, so a timer
/// carrying an old ticket can never move a newer run forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdvanceTicket(u64);

impl AdvanceTicket {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Effect of applying a pending advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the question at `index`.
    Next { index: usize },
    /// The last question was answered.
    Completed,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Quiz state machine: `NotStarted -> InProgress -> Completed`.
///
/// Holds the shuffled questions and the index-aligned answers. `answer` records a value
/// and hands back an [`AdvanceTicket`]; the caller applies it with [`Self::advance`]
/// once the input-lock delay has passed. Every method that returns `Err` leaves the
/// session unchanged.
pub struct QuizSession {
    id: SessionId,
    bank: QuestionBank,
    clock: Clock,
    rng: StdRng,
    phase: QuizPhase,
    questions: Vec<Question>,
    answers: AnswerSet,
    current: usize,
    highlighted: Option<AnswerValue>,
    pending: Option<AdvanceTicket>,
    next_ticket: u64,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Creates a session seeded from the operating system.
    #[must_use]
    pub fn new(bank: QuestionBank) -> Self {
        Self::with_rng(bank, StdRng::from_os_rng())
    }

    /// Creates a session whose randomness follows `settings.shuffle_seed()` when set.
    #[must_use]
    pub fn from_settings(bank: QuestionBank, settings: &QuizSettings) -> Self {
        match settings.shuffle_seed() {
            Some(seed) => Self::with_rng(bank, StdRng::seed_from_u64(seed)),
            None => Self::new(bank),
        }
    }

    #[must_use]
    pub fn with_rng(bank: QuestionBank, rng: StdRng) -> Self {
        Self {
            id: SessionId::new_random(),
            bank,
            clock: Clock::default(),
            rng,
            phase: QuizPhase::NotStarted,
            questions: Vec::new(),
            answers: AnswerSet::default(),
            current: 0,
            highlighted: None,
            pending: None,
            next_ticket: 0,
            started_at: None,
            completed_at: None,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// Zero-based position. Meaningful only while in progress.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.phase.is_in_progress() {
            self.questions.get(self.current)
        } else {
            None
        }
    }

    #[must_use]
    pub fn highlighted(&self) -> Option<AnswerValue> {
        self.highlighted
    }

    #[must_use]
    pub fn pending_advance(&self) -> Option<AdvanceTicket> {
        self.pending
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Time from start to completion, once completed.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        Some(self.completed_at? - self.started_at?)
    }

    /// Builds the question order and clears the answers.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` unless the session is `NotStarted`.
    pub fn start(&mut self) -> Result<(), QuizError> {
        self.require(QuizPhase::NotStarted, "start")?;

        let questions = self.bank.build_session(&mut self.rng);
        let now = self.clock.now();
        self.id = SessionId::new_random();
        self.answers = AnswerSet::unanswered(questions.len());
        self.questions = questions;
        self.current = 0;
        self.highlighted = None;
        self.pending = None;
        self.started_at = Some(now);
        self.completed_at = None;
        self.phase = QuizPhase::InProgress;

        // An empty catalog has nothing to ask.
        if self.questions.is_empty() {
            self.complete();
        }
        Ok(())
    }

    /// Records `value` for the current question and locks input until the returned
    /// ticket is applied with [`Self::advance`].
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` unless in progress,
    /// `QuizError::OutOfRangeAnswer` for values outside `1..=4`, and
    /// `QuizError::AdvancePending` while a previous answer is still advancing.
    pub fn answer(&mut self, value: u8) -> Result<AdvanceTicket, QuizError> {
        self.require(QuizPhase::InProgress, "answer")?;
        let value = AnswerValue::new(value).map_err(|_| QuizError::OutOfRangeAnswer(value))?;
        if self.pending.is_some() {
            return Err(QuizError::AdvancePending);
        }

        self.answers
            .record(self.current, value)
            .map_err(|_| QuizError::InvalidTransition {
                action: "answer",
                phase: self.phase,
            })?;
        self.highlighted = Some(value);

        let ticket = AdvanceTicket(self.next_ticket);
        self.next_ticket += 1;
        self.pending = Some(ticket);
        Ok(ticket)
    }

    /// Applies a delayed advance: clears the highlight, then moves to the next question
    /// or completes the session after the last one.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::StaleAdvance` if `ticket` is not the pending advance, which
    /// happens after a restart or random completion.
    pub fn advance(&mut self, ticket: AdvanceTicket) -> Result<Advance, QuizError> {
        if !self.phase.is_in_progress() || self.pending != Some(ticket) {
            return Err(QuizError::StaleAdvance { ticket: ticket.0 });
        }

        self.pending = None;
        self.highlighted = None;
        if self.current + 1 < self.questions.len() {
            self.current += 1;
            Ok(Advance::Next {
                index: self.current,
            })
        } else {
            self.complete();
            Ok(Advance::Completed)
        }
    }

    /// Fills every unanswered slot from the current question onward with a random value
    /// and completes immediately. Existing answers are kept and any pending advance is
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` unless in progress.
    pub fn jump_to_random_completion(&mut self) -> Result<(), QuizError> {
        self.require(QuizPhase::InProgress, "random completion")?;

        self.pending = None;
        self.highlighted = None;
        let rng = &mut self.rng;
        self.answers.fill_unanswered_from(self.current, || {
            AnswerValue::ALL[rng.random_range(0..AnswerValue::ALL.len())]
        });
        self.complete();
        Ok(())
    }

    /// Returns to `NotStarted` from any phase, dropping questions, answers and any
    /// pending advance.
    pub fn restart(&mut self) {
        self.phase = QuizPhase::NotStarted;
        self.questions.clear();
        self.answers = AnswerSet::default();
        self.current = 0;
        self.highlighted = None;
        self.pending = None;
        self.started_at = None;
        self.completed_at = None;
    }

    /// Per-skill scores in catalog order, computed from whatever is recorded so far.
    #[must_use]
    pub fn results(&self) -> Vec<ScoreResult> {
        score_all(self.bank.catalog().skills(), &self.questions, &self.answers)
    }

    /// Read-only snapshot for the presentation layer.
    #[must_use]
    pub fn view(&self) -> QuizView {
        let results = if self.phase.is_completed() {
            self.results()
        } else {
            Vec::new()
        };
        let position = if self.phase.is_in_progress() {
            self.current + 1
        } else {
            0
        };
        QuizView {
            session_id: self.id,
            phase: self.phase,
            question: self.current_question().cloned(),
            position,
            total: self.questions.len(),
            answered: self.answers.answered_count(),
            highlighted: self.highlighted,
            elapsed: self.elapsed(),
            results,
            skills: self.bank.catalog().skills().collect(),
        }
    }

    fn require(&self, expected: QuizPhase, action: &'static str) -> Result<(), QuizError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(QuizError::InvalidTransition {
                action,
                phase: self.phase,
            })
        }
    }

    fn complete(&mut self) {
        self.pending = None;
        self.highlighted = None;
        self.phase = QuizPhase::Completed;
        self.completed_at = Some(self.clock.now());
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("id", &self.id)
            .field("phase", &self.phase)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("answered", &self.answers.answered_count())
            .field("highlighted", &self.highlighted)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use lifeskills_core::model::Skill;
    use lifeskills_core::scoring::ScoreCategory;
    use lifeskills_core::time::{fixed_clock, fixed_now};
    use lifeskills_core::{Catalog, SkillStatements};
    use std::sync::Arc;

    fn seeded(bank: QuestionBank) -> QuizSession {
        QuizSession::with_rng(bank, StdRng::seed_from_u64(7)).with_clock(fixed_clock())
    }

    fn single_skill_bank() -> QuestionBank {
        QuestionBank::new(Arc::new(Catalog::new(vec![SkillStatements::new(
            Skill::ReceivingLove,
            ["P1"],
            ["N1"],
        )])))
    }

    /// Five skills with one developed and one underdeveloped statement each.
    fn ten_question_bank() -> QuestionBank {
        let entries = Skill::ALL[..5]
            .iter()
            .map(|skill| {
                SkillStatements::new(
                    *skill,
                    [format!("{} P", skill.key())],
                    [format!("{} N", skill.key())],
                )
            })
            .collect();
        QuestionBank::new(Arc::new(Catalog::new(entries)))
    }

    fn answer_and_advance(session: &mut QuizSession, value: u8) -> Advance {
        let ticket = session.answer(value).unwrap();
        session.advance(ticket).unwrap()
    }

    fn answer_text(session: &mut QuizSession, text: &str, value: u8) {
        assert_eq!(session.current_question().unwrap().text, text);
        answer_and_advance(session, value);
    }

    #[test]
    fn start_allocates_aligned_answers() {
        let mut session = seeded(QuestionBank::builtin());
        assert_eq!(session.phase(), QuizPhase::NotStarted);

        session.start().unwrap();

        assert_eq!(session.phase(), QuizPhase::InProgress);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.questions().len(), 70);
        assert_eq!(session.answers().len(), session.questions().len());
        assert_eq!(session.answers().answered_count(), 0);
        assert!(session.started_at().is_some());
    }

    #[test]
    fn start_twice_is_rejected_without_reshuffling() {
        let mut session = seeded(QuestionBank::builtin());
        session.start().unwrap();
        answer_and_advance(&mut session, 2);
        let order = session.questions().to_vec();

        let err = session.start().unwrap_err();

        assert_eq!(
            err,
            QuizError::InvalidTransition {
                action: "start",
                phase: QuizPhase::InProgress
            }
        );
        assert_eq!(session.questions(), order.as_slice());
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn answer_highlights_until_advance() {
        let mut session = seeded(QuestionBank::builtin());
        session.start().unwrap();

        let ticket = session.answer(3).unwrap();
        assert_eq!(session.highlighted().map(AnswerValue::value), Some(3));
        assert_eq!(session.answers().raw(0), 3);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.pending_advance(), Some(ticket));

        let advance = session.advance(ticket).unwrap();
        assert_eq!(advance, Advance::Next { index: 1 });
        assert_eq!(session.highlighted(), None);
        assert_eq!(session.pending_advance(), None);
    }

    #[test]
    fn answer_is_locked_while_advancing() {
        let mut session = seeded(QuestionBank::builtin());
        session.start().unwrap();
        session.answer(2).unwrap();

        assert_eq!(session.answer(4), Err(QuizError::AdvancePending));
        assert_eq!(session.answers().raw(0), 2);
    }

    #[test]
    fn out_of_range_answers_are_rejected() {
        let mut session = seeded(QuestionBank::builtin());
        session.start().unwrap();

        assert_eq!(session.answer(0), Err(QuizError::OutOfRangeAnswer(0)));
        assert_eq!(session.answer(5), Err(QuizError::OutOfRangeAnswer(5)));
        assert_eq!(session.answers().answered_count(), 0);
        assert_eq!(session.pending_advance(), None);
    }

    #[test]
    fn answer_before_start_is_rejected() {
        let mut session = seeded(QuestionBank::builtin());
        assert!(matches!(
            session.answer(1),
            Err(QuizError::InvalidTransition { .. })
        ));
        assert!(session.answers().is_empty());
    }

    #[test]
    fn last_answer_completes() {
        let mut session = seeded(single_skill_bank());
        session.start().unwrap();

        assert_eq!(answer_and_advance(&mut session, 1), Advance::Next { index: 1 });
        assert_eq!(answer_and_advance(&mut session, 1), Advance::Completed);
        assert_eq!(session.phase(), QuizPhase::Completed);
        assert_eq!(session.current_index(), 1);
        assert!(session.answers().is_complete());
        assert_eq!(session.elapsed(), Some(Duration::zero()));
    }

    #[test]
    fn answer_after_completion_is_a_no_op() {
        let mut session = seeded(single_skill_bank());
        session.start().unwrap();
        session.jump_to_random_completion().unwrap();
        let answers = session.answers().clone();

        let err = session.answer(4).unwrap_err();

        assert_eq!(
            err,
            QuizError::InvalidTransition {
                action: "answer",
                phase: QuizPhase::Completed
            }
        );
        assert_eq!(session.answers(), &answers);
        assert_eq!(session.phase(), QuizPhase::Completed);
    }

    #[test]
    fn positive_agreement_scores_good() {
        let mut session = seeded(single_skill_bank());
        session.start().unwrap();
        for _ in 0..2 {
            let text = session.current_question().unwrap().text.clone();
            let value = if text == "P1" { 4 } else { 1 };
            answer_text(&mut session, &text, value);
        }

        let results = session.results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].raw_score, 3);
        assert_eq!(results[0].star_rating, 3);
        assert_eq!(results[0].category, ScoreCategory::Good);
    }

    #[test]
    fn negative_agreement_needs_improvement() {
        let mut session = seeded(single_skill_bank());
        session.start().unwrap();
        for _ in 0..2 {
            let text = session.current_question().unwrap().text.clone();
            let value = if text == "P1" { 1 } else { 4 };
            answer_text(&mut session, &text, value);
        }

        let results = session.results();
        assert_eq!(results[0].raw_score, -3);
        assert_eq!(results[0].star_rating, 1);
        assert_eq!(results[0].category, ScoreCategory::NeedsImprovement);
    }

    #[test]
    fn random_completion_keeps_earlier_answers() {
        let mut session = seeded(ten_question_bank());
        session.start().unwrap();
        for value in [1, 2, 3, 4, 1, 2, 3] {
            answer_and_advance(&mut session, value);
        }
        assert_eq!(session.current_index(), 7);
        let before: Vec<u8> = session.answers().to_raw()[..7].to_vec();

        session.jump_to_random_completion().unwrap();

        let after = session.answers().to_raw();
        assert_eq!(after.len(), 10);
        assert_eq!(&after[..7], before.as_slice());
        assert!(after[7..].iter().all(|v| (1..=4).contains(v)));
        assert_eq!(session.phase(), QuizPhase::Completed);
        assert_eq!(session.pending_advance(), None);
    }

    #[test]
    fn random_completion_cancels_pending_advance() {
        let mut session = seeded(ten_question_bank());
        session.start().unwrap();
        let ticket = session.answer(4).unwrap();

        session.jump_to_random_completion().unwrap();

        assert_eq!(session.answers().raw(0), 4);
        assert_eq!(
            session.advance(ticket),
            Err(QuizError::StaleAdvance {
                ticket: ticket.value()
            })
        );
        assert_eq!(session.phase(), QuizPhase::Completed);
        assert!(session.answers().is_complete());
    }

    #[test]
    fn random_completion_requires_progress() {
        let mut session = seeded(ten_question_bank());
        assert!(session.jump_to_random_completion().is_err());
        assert_eq!(session.phase(), QuizPhase::NotStarted);
    }

    #[test]
    fn restart_then_start_is_fresh() {
        let mut session = seeded(QuestionBank::builtin());
        session.start().unwrap();
        answer_and_advance(&mut session, 4);
        let first_order = session.questions().to_vec();
        let first_id = session.id();

        session.restart();
        assert_eq!(session.phase(), QuizPhase::NotStarted);
        assert!(session.answers().is_empty());
        session.restart();
        assert_eq!(session.phase(), QuizPhase::NotStarted);

        session.start().unwrap();
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.answers().answered_count(), 0);
        assert_eq!(session.answers().len(), session.questions().len());
        assert_ne!(session.id(), first_id);

        let mut a: Vec<_> = first_order.iter().map(|q| q.text.clone()).collect();
        let mut b: Vec<_> = session.questions().iter().map(|q| q.text.clone()).collect();
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }

    #[test]
    fn stale_ticket_does_not_move_a_restarted_session() {
        let mut session = seeded(QuestionBank::builtin());
        session.start().unwrap();
        let stale = session.answer(2).unwrap();

        session.restart();
        session.start().unwrap();
        let fresh = session.answer(3).unwrap();

        assert_ne!(stale, fresh);
        assert!(session.advance(stale).is_err());
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.advance(fresh), Ok(Advance::Next { index: 1 }));
    }

    #[test]
    fn elapsed_spans_start_to_completion() {
        let mut session = seeded(single_skill_bank());
        session.start().unwrap();
        answer_and_advance(&mut session, 3);

        let mut session = session.with_clock(Clock::fixed(fixed_now() + Duration::seconds(95)));
        assert_eq!(session.elapsed(), None);
        answer_and_advance(&mut session, 2);

        assert_eq!(session.started_at(), Some(fixed_now()));
        assert_eq!(session.elapsed(), Some(Duration::seconds(95)));
        assert_eq!(session.view().elapsed, Some(Duration::seconds(95)));
    }

    #[test]
    fn random_fill_covers_the_whole_scale() {
        let mut seen = [false; 4];
        for seed in 0..32 {
            let mut session =
                QuizSession::with_rng(QuestionBank::builtin(), StdRng::seed_from_u64(seed));
            session.start().unwrap();
            session.jump_to_random_completion().unwrap();
            for value in session.answers().to_raw() {
                seen[usize::from(value) - 1] = true;
            }
        }
        assert_eq!(seen, [true; 4]);
    }

    #[test]
    fn empty_catalog_completes_on_start() {
        let mut session = seeded(QuestionBank::new(Arc::new(Catalog::new(Vec::new()))));
        session.start().unwrap();
        assert_eq!(session.phase(), QuizPhase::Completed);
        assert!(session.results().is_empty());
    }

    #[test]
    fn skill_without_statements_scores_zero_on_start() {
        let catalog = Catalog::new(vec![SkillStatements::new(
            Skill::ExpandingCompetence,
            Vec::<String>::new(),
            Vec::<String>::new(),
        )]);
        let mut session = seeded(QuestionBank::new(Arc::new(catalog)));
        session.start().unwrap();

        assert_eq!(session.phase(), QuizPhase::Completed);
        let results = session.view().results;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].skill, Skill::ExpandingCompetence);
        assert_eq!(results[0].raw_score, 0);
        assert_eq!(results[0].star_rating, 1);
    }

    #[test]
    fn view_tracks_position_and_results() {
        let mut session = seeded(single_skill_bank());
        let idle = session.view();
        assert_eq!(idle.phase, QuizPhase::NotStarted);
        assert_eq!(idle.skills, vec![Skill::ReceivingLove]);
        assert_eq!(idle.position, 0);
        assert!(idle.question.is_none());

        session.start().unwrap();
        let ticket = session.answer(2).unwrap();
        let view = session.view();
        assert_eq!(view.position, 1);
        assert_eq!(view.total, 2);
        assert_eq!(view.highlighted.map(AnswerValue::value), Some(2));
        assert!(view.results.is_empty());

        session.advance(ticket).unwrap();
        session.jump_to_random_completion().unwrap();
        let done = session.view();
        assert_eq!(done.phase, QuizPhase::Completed);
        assert!(done.question.is_none());
        assert_eq!(done.results.len(), 1);
        assert_eq!(done.results[0].skill, Skill::ReceivingLove);
        assert_eq!(done.elapsed, Some(Duration::zero()));
    }
}
