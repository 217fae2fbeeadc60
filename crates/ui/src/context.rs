use std::sync::Arc;

use services::{KeyboardBus, QuizLoop};
use tokio::runtime::Handle;

/// Services shared with every component, provided by the composition root (`crates/app`).
#[derive(Clone)]
pub struct AppContext {
    quiz: Arc<QuizLoop>,
    keyboard: KeyboardBus,
    runtime: Handle,
}

impl AppContext {
    #[must_use]
    pub fn new(quiz: Arc<QuizLoop>, keyboard: KeyboardBus, runtime: Handle) -> Self {
        Self {
            quiz,
            keyboard,
            runtime,
        }
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizLoop> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn keyboard(&self) -> KeyboardBus {
        self.keyboard.clone()
    }

    /// Runtime that owns the quiz timers and keyboard bindings.
    #[must_use]
    pub fn runtime(&self) -> Handle {
        self.runtime.clone()
    }
}

/// Build an `AppContext` with a fresh keyboard bus.
#[must_use]
pub fn build_app_context(quiz: Arc<QuizLoop>, runtime: Handle) -> AppContext {
    AppContext::new(quiz, KeyboardBus::new(), runtime)
}
