#![forbid(unsafe_code)]

pub mod error;
pub mod quiz;

pub use lifeskills_core::Clock;

pub use error::QuizError;
pub use quiz::{
    Advance, AdvanceTicket, InputBinding, InputController, KeyPress, KeyboardBus, QuestionBank,
    QuizAction, QuizLoop, QuizSession, QuizView,
};
