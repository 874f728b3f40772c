use dioxus::prelude::*;
use quiz_core::model::{DEFAULT_QUESTION_COUNT, SessionScreen};
use services::SessionError;

use crate::context::AppContext;
use crate::views::{ViewError, transition};

/// Inline text for a failed login; name problems read as typed feedback.
fn login_error_message(err: &SessionError) -> String {
    match err {
        SessionError::Username(reason) => reason.to_string(),
        other => ViewError::from_session(other).message().to_string(),
    }
}

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let screen = use_context::<Signal<SessionScreen>>();
    let session = ctx.session();

    let mut name = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let session = session.clone();
        let raw = name.peek().clone();
        let mut error = error;
        spawn(async move {
            let result = transition(screen, |current| async move {
                session.login(&current, &raw).await
            })
            .await;
            if let Err(err) = result {
                if !matches!(err, SessionError::Username(_)) {
                    tracing::warn!(error = %err, "login failed");
                }
                error.set(Some(login_error_message(&err)));
            }
        });
    };

    rsx! {
        div { class: "login-container fade-in",
            div { class: "login-card",
                div { class: "login-header",
                    div { class: "clapperboard", "🎬" }
                    h1 { class: "login-title",
                        span { class: "title-movie", "Movie" }
                        " Quiz Master"
                    }
                    p { class: "login-subtitle", "Test your film knowledge!" }
                }

                form { class: "login-form", onsubmit: on_submit,
                    div { class: "form-group",
                        label { r#for: "username", class: "form-label", "Your Name" }
                        input {
                            id: "username",
                            class: "input",
                            r#type: "text",
                            placeholder: "Enter your name to start...",
                            autofocus: true,
                            value: "{name}",
                            oninput: move |evt| {
                                name.set(evt.value());
                                error.set(None);
                            },
                        }
                        if let Some(message) = error() {
                            span { class: "error-message", "⚠️ {message}" }
                        }
                    }
                    button { class: "btn btn-primary btn-login", r#type: "submit", "Start Quiz" }
                }

                div { class: "login-footer",
                    div { class: "feature-list",
                        div { class: "feature-item", "🎞️ {DEFAULT_QUESTION_COUNT} Film Questions" }
                        div { class: "feature-item", "⏱️ 5 Minutes Challenge" }
                        div { class: "feature-item", "💾 Resume Anytime" }
                    }
                }
            }
        }
    }
}
