use lifeskills_core::model::{AnswerValue, QuizPhase};
use services::QuizView;

use super::time_fmt::format_elapsed;

pub const ANSWER_HINT: &str =
    "Press 1-4 on your keyboard to answer, or Shift+Enter to complete randomly";
pub const RESTART_HINT: &str = "Press Shift+1 to restart the quiz";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizScreenVm {
    Intro(IntroVm),
    Question(QuestionVm),
    Results(ResultsVm),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntroVm {
    pub title: &'static str,
    pub skills: Vec<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerOptionVm {
    pub value: u8,
    pub label: &'static str,
    pub selected: bool,
    pub class: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub progress_width: String,
    pub position_label: String,
    pub prompt: String,
    pub options: Vec<AnswerOptionVm>,
    pub locked: bool,
    pub hint: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillResultVm {
    pub name: &'static str,
    pub description: &'static str,
    pub stars: u8,
    pub category: &'static str,
    pub narrative: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub items: Vec<SkillResultVm>,
    pub elapsed_label: Option<String>,
    pub hint: &'static str,
}

#[must_use]
pub fn map_quiz_view(view: &QuizView) -> QuizScreenVm {
    match (view.phase, view.question.as_ref()) {
        (QuizPhase::Completed, _) => QuizScreenVm::Results(map_results(view)),
        (QuizPhase::InProgress, Some(question)) => QuizScreenVm::Question(QuestionVm {
            progress_width: format!("{:.1}%", view.progress() * 100.0),
            position_label: format!("Question {} of {}", view.position, view.total),
            prompt: question.text.clone(),
            options: map_options(view.highlighted),
            locked: view.is_input_locked(),
            hint: ANSWER_HINT,
        }),
        _ => QuizScreenVm::Intro(IntroVm {
            title: "Which Developmental Skills are You Strong in?",
            skills: view.skills.iter().map(|skill| skill.name()).collect(),
        }),
    }
}

fn map_options(highlighted: Option<AnswerValue>) -> Vec<AnswerOptionVm> {
    AnswerValue::ALL
        .iter()
        .map(|value| {
            let selected = highlighted == Some(*value);
            AnswerOptionVm {
                value: value.value(),
                label: value.label(),
                selected,
                class: if selected {
                    "quiz-option__btn quiz-option__btn--selected"
                } else {
                    "quiz-option__btn"
                },
            }
        })
        .collect()
}

fn map_results(view: &QuizView) -> ResultsVm {
    let items = view
        .results
        .iter()
        .map(|result| SkillResultVm {
            name: result.skill.name(),
            description: result.skill.description(),
            stars: result.star_rating,
            category: result.category.label(),
            narrative: result.narrative.clone(),
        })
        .collect();

    ResultsVm {
        items,
        elapsed_label: view
            .elapsed
            .map(|elapsed| format!("Finished in {}", format_elapsed(elapsed))),
        hint: RESTART_HINT,
    }
}

/// Filled state of each of the five stars for `rating`.
#[must_use]
pub fn star_slots(rating: u8) -> [bool; 5] {
    std::array::from_fn(|index| usize::from(rating) > index)
}

#[must_use]
pub fn star_class(filled: bool) -> &'static str {
    if filled {
        "star-rating__star star-rating__star--filled"
    } else {
        "star-rating__star"
    }
}
