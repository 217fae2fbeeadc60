use std::cell::RefCell;
use std::rc::Rc;

use dioxus::document::eval;
use dioxus::prelude::*;

use services::{InputBinding, InputController, KeyPress, QuizAction};

use crate::context::AppContext;
use crate::vm::{
    AnswerOptionVm, IntroVm, QuestionVm, QuizScreenVm, ResultsVm, SkillResultVm, map_quiz_view,
    star_class, star_slots,
};

/// Host key to the `KeyPress` naming the input controller expects.
fn key_press(key: &Key, shift: bool) -> KeyPress {
    let name = match key {
        Key::Character(text) => text.clone(),
        other => other.to_string(),
    };
    KeyPress::new(name, shift)
}

#[component]
pub fn QuizScreen() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz = ctx.quiz();
    let mut view = use_signal({
        let quiz = quiz.clone();
        move || quiz.view()
    });

    use_future({
        let quiz = quiz.clone();
        move || {
            let mut updates = quiz.subscribe();
            async move {
                while updates.changed().await.is_ok() {
                    let latest = updates.borrow_and_update().clone();
                    view.set(latest);
                }
            }
        }
    });

    // One binding per mounted screen; released when the screen goes away.
    let binding = use_hook({
        let ctx = ctx.clone();
        move || {
            let binding =
                InputController::new().bind(&ctx.keyboard(), &ctx.quiz(), &ctx.runtime());
            Rc::new(RefCell::new(Some(binding)))
        }
    });
    use_drop({
        let binding: Rc<RefCell<Option<InputBinding>>> = binding.clone();
        move || {
            binding.borrow_mut().take();
        }
    });

    use_effect(move || {
        let _ = view.read().phase;
        let _ = eval(r#"document.getElementById("quiz-root")?.focus();"#);
    });

    let dispatch = {
        let quiz = quiz.clone();
        use_callback(move |action: QuizAction| quiz.dispatch(action))
    };

    let on_key = {
        let keyboard = ctx.keyboard();
        use_callback(move |evt: KeyboardEvent| {
            let shift = evt.data.modifiers().contains(Modifiers::SHIFT);
            let press = key_press(&evt.data.key(), shift);
            if InputController::action_for(&press, view.read().phase).is_some() {
                evt.prevent_default();
            }
            keyboard.publish(press);
        })
    };

    let body = match map_quiz_view(&view.read()) {
        QuizScreenVm::Intro(intro) => rsx! { IntroCard { intro, on_action: dispatch } },
        QuizScreenVm::Question(question) => rsx! { QuestionCard { question, on_action: dispatch } },
        QuizScreenVm::Results(results) => rsx! { ResultsCard { results, on_action: dispatch } },
    };

    rsx! {
        div {
            id: "quiz-root",
            class: "quiz",
            tabindex: "0",
            onkeydown: move |evt| on_key.call(evt),
            {body}
        }
    }
}

#[component]
fn IntroCard(intro: IntroVm, on_action: Callback<QuizAction>) -> Element {
    rsx! {
        section { class: "quiz-intro",
            h1 { class: "quiz-intro__title", "{intro.title}" }
            p { "Rate how often each statement applies to you. Your answers are scored across these skills:" }
            ul { class: "quiz-intro__skills",
                for skill in intro.skills.iter() {
                    li { key: "{skill}", "{skill}" }
                }
            }
            button {
                id: "quiz-start",
                class: "btn btn-primary",
                r#type: "button",
                onclick: move |_| on_action.call(QuizAction::Start),
                "Take the Quiz"
            }
        }
    }
}

#[component]
fn QuestionCard(question: QuestionVm, on_action: Callback<QuizAction>) -> Element {
    rsx! {
        section { class: "quiz-question",
            div { class: "quiz-progress",
                div {
                    class: "quiz-progress__bar",
                    style: "width: {question.progress_width}",
                }
            }
            p { class: "quiz-question__position", "{question.position_label}" }
            h2 { class: "quiz-question__prompt", "{question.prompt}" }
            div { class: "quiz-options",
                for option in question.options.iter().cloned() {
                    AnswerOption { key: "{option.value}", option, locked: question.locked, on_action }
                }
            }
            p { class: "quiz-question__hint", "{question.hint}" }
        }
    }
}

#[component]
fn AnswerOption(option: AnswerOptionVm, locked: bool, on_action: Callback<QuizAction>) -> Element {
    let value = option.value;
    rsx! {
        button {
            class: "{option.class}",
            r#type: "button",
            disabled: locked,
            onclick: move |_| on_action.call(QuizAction::Answer(value)),
            span { class: "quiz-option__key", "{value}" }
            span { class: "quiz-option__label", "{option.label}" }
        }
    }
}

#[component]
fn ResultsCard(results: ResultsVm, on_action: Callback<QuizAction>) -> Element {
    rsx! {
        section { class: "quiz-results",
            h1 { "Your Results" }
            if let Some(label) = results.elapsed_label.as_ref() {
                p { class: "quiz-results__elapsed", "{label}" }
            }
            div { class: "quiz-results__grid",
                for item in results.items.iter().cloned() {
                    SkillResult { key: "{item.name}", item }
                }
            }
            p { class: "quiz-results__hint", "{results.hint}" }
            button {
                id: "quiz-restart",
                class: "btn btn-secondary",
                r#type: "button",
                onclick: move |_| on_action.call(QuizAction::Restart),
                "Retake the Quiz"
            }
        }
    }
}

#[component]
fn SkillResult(item: SkillResultVm) -> Element {
    rsx! {
        article { class: "skill-result",
            h2 { class: "skill-result__name", "{item.name}" }
            p { class: "skill-result__description", "{item.description}" }
            StarRating { rating: item.stars }
            p { class: "skill-result__level", "Your skill level: {item.category}" }
            p { class: "skill-result__narrative", "{item.narrative}" }
        }
    }
}

/// Five stars, the first `rating` of them filled.
#[component]
pub fn StarRating(rating: u8) -> Element {
    rsx! {
        div {
            class: "star-rating",
            aria_label: "{rating} out of 5 stars",
            for (index, filled) in star_slots(rating).into_iter().enumerate() {
                span { key: "{index}", class: star_class(filled), "★" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn character_keys_keep_their_glyph() {
        assert_eq!(
            key_press(&Key::Character("!".to_string()), true),
            KeyPress::shifted("!")
        );
        assert_eq!(
            key_press(&Key::Character("3".to_string()), false),
            KeyPress::plain("3")
        );
    }

    #[test]
    fn named_keys_use_their_dom_name() {
        assert_eq!(key_press(&Key::Enter, true), KeyPress::shifted("Enter"));
        assert_eq!(key_press(&Key::Escape, false), KeyPress::plain("Escape"));
    }
}
