use dioxus::prelude::*;

use crate::views::QuizScreen;

#[component]
pub fn App() -> Element {
    rsx! {
        document::Title { "Life Skills Quiz" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                QuizScreen {}
            }
        }
    }
}
