use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::{debug, info};

use lifeskills_core::model::{AnswerSet, Question, QuizPhase, QuizSettings};

use super::bank::QuestionBank;
use super::input::QuizAction;
use super::session::{Advance, AdvanceTicket, QuizSession};
use super::view::QuizView;
use crate::error::QuizError;

struct LoopState {
    session: QuizSession,
    timer: Option<AbortHandle>,
}

impl LoopState {
    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

struct Shared {
    state: Mutex<LoopState>,
    updates: watch::Sender<QuizView>,
    delay: Duration,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, LoopState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &LoopState) {
        self.updates.send_replace(state.session.view());
    }

    fn fire(&self, ticket: AdvanceTicket) {
        let mut state = self.lock();
        match state.session.advance(ticket) {
            Ok(Advance::Next { index }) => {
                state.timer = None;
                debug!(session_id = %state.session.id(), index, "advanced to next question");
            }
            Ok(Advance::Completed) => {
                state.timer = None;
                info!(session_id = %state.session.id(), "quiz completed");
            }
            Err(err) => {
                ignored("advance", &state.session, &err);
                return;
            }
        }
        self.publish(&state);
    }
}

fn ignored(action: &'static str, session: &QuizSession, err: &QuizError) {
    debug!(
        session_id = %session.id(),
        phase = %session.phase(),
        action,
        error = %err,
        "ignored quiz action"
    );
}

/// Runs a [`QuizSession`] for the presentation layer.
///
/// Every action is fire-and-forget: rejected actions are logged at `debug` and dropped.
/// After an answer the advance runs on `runtime` once the configured delay has elapsed;
/// that task is aborted by restart, random completion and drop, and a ticket check in
/// the session discards it if it fires anyway. Each state change is published to
/// [`Self::subscribe`] receivers.
pub struct QuizLoop {
    shared: Arc<Shared>,
    runtime: Handle,
}

impl QuizLoop {
    #[must_use]
    pub fn new(session: QuizSession, settings: &QuizSettings, runtime: Handle) -> Self {
        let (updates, _) = watch::channel(session.view());
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(LoopState {
                    session,
                    timer: None,
                }),
                updates,
                delay: settings.advance_delay(),
            }),
            runtime,
        }
    }

    /// Builds the session from `bank` with the randomness configured in `settings`.
    #[must_use]
    pub fn from_settings(bank: QuestionBank, settings: &QuizSettings, runtime: Handle) -> Self {
        Self::new(QuizSession::from_settings(bank, settings), settings, runtime)
    }

    /// Receiver that observes a fresh [`QuizView`] after every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<QuizView> {
        self.shared.updates.subscribe()
    }

    #[must_use]
    pub fn view(&self) -> QuizView {
        self.shared.lock().session.view()
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.shared.lock().session.phase()
    }

    #[must_use]
    pub fn questions(&self) -> Vec<Question> {
        self.shared.lock().session.questions().to_vec()
    }

    #[must_use]
    pub fn answers(&self) -> AnswerSet {
        self.shared.lock().session.answers().clone()
    }

    #[must_use]
    pub fn has_pending_advance(&self) -> bool {
        self.shared.lock().timer.is_some()
    }

    /// Handle of the scheduled advance task while one is outstanding.
    ///
    /// The handle stays valid after the task is cancelled, so callers can observe
    /// `is_finished()` once the loop has moved on.
    #[must_use]
    pub fn pending_advance_task(&self) -> Option<AbortHandle> {
        self.shared.lock().timer.clone()
    }

    pub fn dispatch(&self, action: QuizAction) {
        match action {
            QuizAction::Start => self.start(),
            QuizAction::Answer(value) => self.answer(value),
            QuizAction::RandomComplete => self.jump_to_random_completion(),
            QuizAction::Restart => self.restart(),
        }
    }

    pub fn start(&self) {
        let mut state = self.shared.lock();
        match state.session.start() {
            Ok(()) => {
                info!(
                    session_id = %state.session.id(),
                    questions = state.session.questions().len(),
                    "quiz started"
                );
                self.shared.publish(&state);
            }
            Err(err) => ignored("start", &state.session, &err),
        }
    }

    pub fn answer(&self, value: u8) {
        let mut state = self.shared.lock();
        let ticket = match state.session.answer(value) {
            Ok(ticket) => ticket,
            Err(err) => {
                ignored("answer", &state.session, &err);
                return;
            }
        };

        state.cancel_timer();
        let shared = Arc::downgrade(&self.shared);
        let delay = self.shared.delay;
        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(shared) = shared.upgrade() {
                shared.fire(ticket);
            }
        });
        state.timer = Some(task.abort_handle());
        self.shared.publish(&state);
    }

    pub fn jump_to_random_completion(&self) {
        let mut state = self.shared.lock();
        match state.session.jump_to_random_completion() {
            Ok(()) => {
                state.cancel_timer();
                info!(session_id = %state.session.id(), "quiz completed with random answers");
                self.shared.publish(&state);
            }
            Err(err) => ignored("random completion", &state.session, &err),
        }
    }

    pub fn restart(&self) {
        let mut state = self.shared.lock();
        state.cancel_timer();
        state.session.restart();
        info!(session_id = %state.session.id(), "quiz restarted");
        self.shared.publish(&state);
    }
}

impl Drop for QuizLoop {
    fn drop(&mut self) {
        self.shared.lock().cancel_timer();
    }
}
