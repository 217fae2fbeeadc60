mod quiz_vm;
mod time_fmt;

pub use quiz_vm::{
    AnswerOptionVm, IntroVm, QuestionVm, QuizScreenVm, ResultsVm, SkillResultVm, map_quiz_view,
    star_class, star_slots,
};
pub use time_fmt::format_elapsed;
