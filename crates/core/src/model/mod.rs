mod answer;
mod ids;
mod phase;
mod settings;
mod skill;
mod statement;

pub use answer::{AnswerError, AnswerSet, AnswerValue};
pub use ids::SessionId;
pub use phase::QuizPhase;
pub use settings::{QuizSettings, SettingsError};
pub use skill::Skill;
pub use statement::{Question, Statement};
