use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AnswerError {
    #[error("answer value must be between 1 and 4, got {0}")]
    OutOfRange(u8),

    #[error("answer slot {index} is out of range for {len} questions")]
    SlotOutOfRange { index: usize, len: usize },
}

//
// ─── ANSWER VALUE ─────────────────────────────────────────────────────────────
//

/// Agreement with a statement on the 1-4 scale.
///
/// - `1`: Never
/// - `2`: A little
/// - `3`: Regularly
/// - `4`: A lot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct AnswerValue(u8);

impl AnswerValue {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    /// The four choices in ascending order.
    pub const ALL: [AnswerValue; 4] = [
        AnswerValue(1),
        AnswerValue(2),
        AnswerValue(3),
        AnswerValue(4),
    ];

    /// # Errors
    ///
    /// Returns `AnswerError::OutOfRange` if `value` is not in `1..=4`.
    pub fn new(value: u8) -> Result<Self, AnswerError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(AnswerError::OutOfRange(value))
        }
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Label printed under the answer button.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "Never",
            2 => "A little",
            3 => "Regularly",
            _ => "A lot",
        }
    }
}

impl TryFrom<u8> for AnswerValue {
    type Error = AnswerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AnswerValue> for u8 {
    fn from(value: AnswerValue) -> Self {
        value.0
    }
}

//
// ─── ANSWER SET ───────────────────────────────────────────────────────────────
//

/// Per-session responses, one slot per question, index-aligned with the question order.
///
/// The slot count is fixed at creation; `None` marks an unanswered slot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnswerSet {
    slots: Vec<Option<AnswerValue>>,
}

impl AnswerSet {
    /// Creates `len` unanswered slots.
    #[must_use]
    pub fn unanswered(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<AnswerValue> {
        self.slots.get(index).copied().flatten()
    }

    /// Numeric value of a slot, `0` when unanswered.
    #[must_use]
    pub fn raw(&self, index: usize) -> u8 {
        self.get(index).map_or(0, AnswerValue::value)
    }

    #[must_use]
    pub fn is_answered(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Stores `value` in slot `index`, replacing any earlier answer.
    ///
    /// # Errors
    ///
    /// Returns `AnswerError::SlotOutOfRange` if `index` has no slot.
    pub fn record(&mut self, index: usize, value: AnswerValue) -> Result<(), AnswerError> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(AnswerError::SlotOutOfRange { index, len })?;
        *slot = Some(value);
        Ok(())
    }

    /// Fills every unanswered slot from `start` onward with values drawn from `next`.
    ///
    /// Answered slots are never touched. Returns how many slots were filled.
    pub fn fill_unanswered_from(
        &mut self,
        start: usize,
        mut next: impl FnMut() -> AnswerValue,
    ) -> usize {
        let mut filled = 0;
        for slot in self.slots.iter_mut().skip(start).filter(|slot| slot.is_none()) {
            *slot = Some(next());
            filled += 1;
        }
        filled
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// True once every slot holds an answer.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<AnswerValue>> + '_ {
        self.slots.iter().copied()
    }

    /// Slot values with `0` for unanswered slots.
    #[must_use]
    pub fn to_raw(&self) -> Vec<u8> {
        (0..self.slots.len()).map(|index| self.raw(index)).collect()
    }
}
