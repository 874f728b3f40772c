use dioxus::prelude::*;
use quiz_core::model::{ResultsSummary, SessionScreen, User};

use crate::context::AppContext;
use crate::views::{ViewError, spawn_logout, transition};
use crate::vm::{ResultsVm, ReviewRowVm, map_results};

#[component]
pub fn ResultsView(user: User, summary: ResultsSummary) -> Element {
    let ctx = use_context::<AppContext>();
    let screen = use_context::<Signal<SessionScreen>>();
    let session = ctx.session();
    let notice = use_signal(|| None::<ViewError>);

    let on_restart = {
        let session = session.clone();
        move |_: MouseEvent| {
            let session = session.clone();
            let mut notice = notice;
            spawn(async move {
                let result = transition(screen, |current| async move {
                    session.restart(&current).await
                })
                .await;
                if let Err(err) = result {
                    tracing::warn!(error = %err, "restart failed");
                    notice.set(Some(ViewError::from_session(&err)));
                }
            });
        }
    };
    let on_logout = move |_: MouseEvent| spawn_logout(session.clone(), screen, notice);

    let vm: ResultsVm = map_results(&summary);
    let username = user.username().as_str().to_owned();

    rsx! {
        div { class: "results-container fade-in",
            div { class: "results-card card",
                div { class: "results-header",
                    if vm.celebrate {
                        div { class: "confetti-container",
                            for i in 0..5 {
                                div { key: "{i}", class: "confetti" }
                            }
                        }
                    }
                    div { class: "trophy-icon", "🏆" }
                    h1 { class: "results-title", "Quiz Completed!" }
                    p { class: "results-subtitle", "Here's how you did, {username}" }
                }

                div { class: "score-display",
                    div { class: "score-circle", style: "border-color: {vm.grade_color}",
                        div { class: "score-inner",
                            span { class: "score-percentage", style: "color: {vm.grade_color}", "{vm.percentage_label}" }
                            span { class: "score-grade", style: "color: {vm.grade_color}", "{vm.grade_label}" }
                        }
                    }
                    p { class: "grade-message", style: "color: {vm.grade_color}", "{vm.grade_message}" }
                }

                div { class: "results-stats",
                    div { class: "result-stat-card correct",
                        span { class: "stat-number", "{vm.correct}" }
                        span { class: "stat-text", "Correct" }
                    }
                    div { class: "result-stat-card wrong",
                        span { class: "stat-number", "{vm.wrong}" }
                        span { class: "stat-text", "Wrong" }
                    }
                    if vm.unanswered > 0 {
                        div { class: "result-stat-card unanswered",
                            span { class: "stat-number", "{vm.unanswered}" }
                            span { class: "stat-text", "Unanswered" }
                        }
                    }
                }

                dl { class: "results-details",
                    dt { "Total Questions" }
                    dd { "{vm.total}" }
                    dt { "Time Spent" }
                    dd { "{vm.time_spent_label}" }
                    dt { "Score" }
                    dd { "{vm.score_label}" }
                }

                if !vm.review.is_empty() {
                    details { class: "results-review",
                        summary { "Review answers" }
                        ol {
                            for row in vm.review.iter().cloned() {
                                ReviewRow { key: "{row.number}", row }
                            }
                        }
                    }
                }

                if let Some(err) = notice() {
                    p { class: "error-message", "{err.message()}" }
                }

                div { class: "results-actions",
                    button { class: "btn btn-primary", r#type: "button", onclick: on_restart, "Try Again" }
                    button { class: "btn btn-secondary", r#type: "button", onclick: on_logout, "Logout" }
                }
            }
        }
    }
}

#[component]
fn ReviewRow(row: ReviewRowVm) -> Element {
    rsx! {
        li { class: row.outcome.css_class(),
            p { class: "review-question", "{row.question}" }
            p { class: "review-answer", "Your answer: {row.your_answer}" }
            p { class: "review-correct", "Correct answer: {row.correct_answer}" }
        }
    }
}
