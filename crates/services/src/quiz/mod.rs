mod bank;
mod input;
mod runner;
mod session;
mod view;

// Public API of the quiz subsystem.
pub use bank::QuestionBank;
pub use input::{InputBinding, InputController, KeyPress, KeyboardBus, QuizAction};
pub use runner::QuizLoop;
pub use session::{Advance, AdvanceTicket, QuizSession};
pub use view::QuizView;
