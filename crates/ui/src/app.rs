use dioxus::prelude::*;
use quiz_core::model::SessionScreen;

use crate::context::AppContext;
use crate::views::{LoginView, QuizView, ResultsView};

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "Movie Quiz" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                SessionRoot {}
            }
        }
    }
}

/// Owns the active screen and renders exactly one view for it.
#[component]
pub(crate) fn SessionRoot() -> Element {
    let ctx = use_context::<AppContext>();
    let screen = use_context_provider(|| Signal::new(ctx.initial_screen()));

    let current = screen.read().clone();
    match current {
        SessionScreen::Login => rsx! { LoginView {} },
        SessionScreen::Quiz { user, resume } => rsx! { QuizView { user, resume } },
        SessionScreen::Results { user, summary } => rsx! { ResultsView { user, summary } },
    }
}
