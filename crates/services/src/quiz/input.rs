use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::AbortHandle;
use tracing::{debug, trace};

use lifeskills_core::model::QuizPhase;

use super::runner::QuizLoop;

/// A key press from the host's key stream.
///
/// `key` follows the DOM `KeyboardEvent.key` naming: `"1"`, `"Enter"`, `"!"`, ...
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub shift: bool,
}

impl KeyPress {
    #[must_use]
    pub fn new(key: impl Into<String>, shift: bool) -> Self {
        Self {
            key: key.into(),
            shift,
        }
    }

    #[must_use]
    pub fn plain(key: impl Into<String>) -> Self {
        Self::new(key, false)
    }

    #[must_use]
    pub fn shifted(key: impl Into<String>) -> Self {
        Self::new(key, true)
    }
}

/// Operations the presentation layer and the keyboard can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizAction {
    Start,
    Answer(u8),
    RandomComplete,
    Restart,
}

/// Stateless translator from key presses to quiz actions.
///
/// Bindings, first match wins:
/// 1. Shift+`1` restarts in any phase.
/// 2. `1`..`4` answer while in progress.
/// 3. Shift+Enter completes randomly while in progress.
///
/// Everything else is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputController;

impl InputController {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn action_for(key: &KeyPress, phase: QuizPhase) -> Option<QuizAction> {
        // With Shift held most layouts report the shifted glyph instead of the digit.
        if key.shift && matches!(key.key.as_str(), "1" | "!") {
            return Some(QuizAction::Restart);
        }
        if !phase.is_in_progress() {
            return None;
        }
        match key.key.as_str() {
            "1" => Some(QuizAction::Answer(1)),
            "2" => Some(QuizAction::Answer(2)),
            "3" => Some(QuizAction::Answer(3)),
            "4" => Some(QuizAction::Answer(4)),
            "Enter" if key.shift => Some(QuizAction::RandomComplete),
            _ => None,
        }
    }

    /// Applies `key` to `quiz` and returns the action taken, if any.
    pub fn handle(&self, quiz: &QuizLoop, key: &KeyPress) -> Option<QuizAction> {
        let action = Self::action_for(key, quiz.phase());
        trace!(key = %key.key, shift = key.shift, ?action, "key press");
        if let Some(action) = action {
            quiz.dispatch(action);
        }
        action
    }

    /// Subscribes to `bus` on behalf of `quiz` until the returned binding is dropped.
    ///
    /// The binding holds `quiz` weakly and stops on its own once the quiz is gone.
    pub fn bind(&self, bus: &KeyboardBus, quiz: &Arc<QuizLoop>, runtime: &Handle) -> InputBinding {
        let mut keys = bus.sender.subscribe();
        let quiz = Arc::downgrade(quiz);
        let controller = *self;
        let task = runtime.spawn(async move {
            loop {
                match keys.recv().await {
                    Ok(key) => {
                        let Some(quiz) = quiz.upgrade() else {
                            break;
                        };
                        controller.handle(&quiz, &key);
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        debug!(skipped, "keyboard bus lagged, dropping key presses");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
        InputBinding {
            task: task.abort_handle(),
        }
    }
}

/// Broadcast channel carrying the host's key presses.
#[derive(Debug, Clone)]
pub struct KeyboardBus {
    sender: broadcast::Sender<KeyPress>,
}

impl KeyboardBus {
    pub const CAPACITY: usize = 32;

    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(Self::CAPACITY);
        Self { sender }
    }

    /// Sends `key` to every active binding and returns how many received it.
    pub fn publish(&self, key: KeyPress) -> usize {
        self.sender.send(key).unwrap_or(0)
    }

    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for KeyboardBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Active keyboard subscription. Dropping it unsubscribes.
#[derive(Debug)]
#[must_use = "dropping the binding unsubscribes immediately"]
pub struct InputBinding {
    task: AbortHandle,
}

impl InputBinding {
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for InputBinding {
    fn drop(&mut self) {
        self.task.abort();
    }
}
