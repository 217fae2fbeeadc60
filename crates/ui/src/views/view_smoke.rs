use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{QuestionBank, QuizLoop, QuizSession};
use tokio::runtime::Handle;

use lifeskills_core::model::QuizSettings;

use crate::context::{AppContext, build_app_context};
use crate::views::{QuizScreen, StarRating};

#[derive(Props, Clone)]
struct HarnessProps {
    ctx: AppContext,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn Harness(props: HarnessProps) -> Element {
    use_context_provider(|| props.ctx.clone());
    rsx! { QuizScreen {} }
}

fn quiz() -> Arc<QuizLoop> {
    let session = QuizSession::with_rng(QuestionBank::builtin(), StdRng::seed_from_u64(5));
    Arc::new(QuizLoop::new(session, &QuizSettings::default(), Handle::current()))
}

fn render(ctx: AppContext) -> String {
    let mut dom = VirtualDom::new_with_props(Harness, HarnessProps { ctx });
    dom.rebuild_in_place();
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dioxus_ssr::render(&dom)
}

#[test]
fn star_rating_fills_from_the_left() {
    let mut dom = VirtualDom::new(|| rsx! { StarRating { rating: 3 } });
    dom.rebuild_in_place();
    let html = dioxus_ssr::render(&dom);

    assert_eq!(html.matches("star-rating__star--filled").count(), 3);
    assert_eq!(html.matches("★").count(), 5);
    assert!(html.contains("3 out of 5 stars"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn intro_lists_skills_before_start() {
    let quiz = quiz();
    let html = render(build_app_context(quiz, Handle::current()));

    assert!(html.contains("Take the Quiz"), "{html}");
    assert!(html.contains("Receiving Love"), "{html}");
    assert!(html.contains("Expanding Love"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn question_screen_shows_position_and_options() {
    let quiz = quiz();
    quiz.start();
    let html = render(build_app_context(quiz, Handle::current()));

    assert!(html.contains("Question 1 of 70"), "{html}");
    for label in ["Never", "A little", "Regularly", "A lot"] {
        assert!(html.contains(label), "missing {label} in {html}");
    }
    assert!(html.contains("Shift+Enter"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_screen_shows_every_skill() {
    let quiz = quiz();
    quiz.start();
    quiz.jump_to_random_completion();
    let html = render(build_app_context(quiz, Handle::current()));

    assert!(html.contains("Your skill level:"), "{html}");
    assert_eq!(html.matches("skill-result__name").count(), 7);
    assert!(html.contains("Press Shift+1 to restart the quiz"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn mounted_screen_binds_the_keyboard() {
    let quiz = quiz();
    let ctx = build_app_context(Arc::clone(&quiz), Handle::current());
    let keyboard = ctx.keyboard();
    let mut dom = VirtualDom::new_with_props(Harness, HarnessProps { ctx });
    dom.rebuild_in_place();

    assert_eq!(keyboard.binding_count(), 1);
    drop(dom);
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
    assert_eq!(keyboard.binding_count(), 0);
}
