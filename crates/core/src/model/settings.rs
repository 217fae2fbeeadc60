use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("advance delay must be at most {max} ms, got {got}")]
    AdvanceDelayTooLong { got: u32, max: u32 },
}

/// Tunables for a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSettings {
    advance_delay_ms: u32,
    shuffle_seed: Option<u64>,
}

impl QuizSettings {
    /// Pause between recording an answer and showing the next question.
    pub const DEFAULT_ADVANCE_DELAY_MS: u32 = 300;
    pub const MAX_ADVANCE_DELAY_MS: u32 = 5_000;

    /// # Errors
    ///
    /// Returns `SettingsError::AdvanceDelayTooLong` if the delay exceeds
    /// `MAX_ADVANCE_DELAY_MS`.
    pub fn new(advance_delay_ms: u32, shuffle_seed: Option<u64>) -> Result<Self, SettingsError> {
        if advance_delay_ms > Self::MAX_ADVANCE_DELAY_MS {
            return Err(SettingsError::AdvanceDelayTooLong {
                got: advance_delay_ms,
                max: Self::MAX_ADVANCE_DELAY_MS,
            });
        }
        Ok(Self {
            advance_delay_ms,
            shuffle_seed,
        })
    }

    #[must_use]
    pub fn advance_delay_ms(&self) -> u32 {
        self.advance_delay_ms
    }

    #[must_use]
    pub fn advance_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.advance_delay_ms))
    }

    /// Seed for question order and random completion. `None` draws from the OS.
    #[must_use]
    pub fn shuffle_seed(&self) -> Option<u64> {
        self.shuffle_seed
    }

    #[must_use]
    pub fn with_shuffle_seed(mut self, seed: Option<u64>) -> Self {
        self.shuffle_seed = seed;
        self
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            advance_delay_ms: Self::DEFAULT_ADVANCE_DELAY_MS,
            shuffle_seed: None,
        }
    }
}
