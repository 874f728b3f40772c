use std::sync::Arc;

use dioxus::prelude::*;
use futures_util::StreamExt;
use quiz_core::model::{QuizSnapshot, ResultsSummary, SessionScreen, User};
use quiz_core::time::{AUTO_ADVANCE_DELAY, TIMER_INTERVAL};
use services::{QuizLoopService, SessionService};

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, logout, spawn_logout, transition};
use crate::vm::{QuizIntent, QuizScreenVm, QuizStep, QuizVm, option_index_for_key};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

/// Lets view tests feed intents straight into the driver or go through the
/// same callbacks the buttons use.
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    driver: Rc<RefCell<Option<Coroutine<QuizIntent>>>>,
    pick: Rc<RefCell<Option<Callback<String>>>>,
    logout: Rc<RefCell<Option<Callback<()>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    fn register(
        &self,
        driver: Coroutine<QuizIntent>,
        pick: Callback<String>,
        logout: Callback<()>,
    ) {
        *self.driver.borrow_mut() = Some(driver);
        *self.pick.borrow_mut() = Some(pick);
        *self.logout.borrow_mut() = Some(logout);
    }

    pub(crate) fn send(&self, intent: QuizIntent) {
        if let Some(driver) = self.driver.borrow().as_ref() {
            driver.send(intent);
        }
    }

    pub(crate) fn pick(&self) -> Callback<String> {
        (*self.pick.borrow()).expect("quiz pick registered")
    }

    pub(crate) fn logout(&self) -> Callback<()> {
        (*self.logout.borrow()).expect("quiz logout registered")
    }
}

/// Apply one intent and publish the new frame. A failed step is reported on
/// `notice` and the run carries on.
async fn drive(
    vm: &mut QuizVm,
    quiz_loop: &QuizLoopService,
    intent: QuizIntent,
    mut frame: Signal<Option<QuizScreenVm>>,
    mut notice: Signal<Option<ViewError>>,
) -> QuizStep {
    let step = vm.dispatch(quiz_loop, intent).await;
    frame.set(Some(vm.screen()));
    step.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "quiz step failed");
        notice.set(Some(ViewError::from_quiz(&err)));
        QuizStep::Continue
    })
}

async fn finish(
    session: Arc<SessionService>,
    screen: Signal<SessionScreen>,
    summary: ResultsSummary,
    mut notice: Signal<Option<ViewError>>,
) {
    let result = transition(screen, |current| async move {
        session.complete(&current, summary).await
    })
    .await;
    if let Err(err) = result {
        tracing::warn!(error = %err, "could not show results");
        notice.set(Some(ViewError::from_session(&err)));
    }
}

#[component]
pub fn QuizView(user: User, resume: Option<QuizSnapshot>) -> Element {
    let ctx = use_context::<AppContext>();
    let screen = use_context::<Signal<SessionScreen>>();
    let session = ctx.session();
    let quiz_loop = ctx.quiz_loop();

    let frame = use_signal(|| None::<QuizScreenVm>);
    let load_error = use_signal(|| None::<ViewError>);
    let notice = use_signal(|| None::<ViewError>);

    // One task owns the run; ticks, picks and advances are applied in order.
    let driver = {
        let session = session.clone();
        use_coroutine(move |mut rx: UnboundedReceiver<QuizIntent>| {
            let quiz_loop = Arc::clone(&quiz_loop);
            let session = Arc::clone(&session);
            let resume = resume.clone();
            let mut frame = frame;
            let mut load_error = load_error;

            async move {
                let mut vm = match QuizVm::start(&quiz_loop, resume).await {
                    Ok(vm) => vm,
                    Err(err) => {
                        tracing::warn!(error = %err, "quiz could not start");
                        load_error.set(Some(ViewError::from_quiz(&err)));
                        return;
                    }
                };
                frame.set(Some(vm.screen()));

                let mut queued = vm.pending_advance();
                if queued.is_some() {
                    tokio::time::sleep(AUTO_ADVANCE_DELAY).await;
                }
                loop {
                    let intent = match queued.take() {
                        Some(intent) => intent,
                        None => match rx.next().await {
                            Some(intent) => intent,
                            None => break,
                        },
                    };
                    match drive(&mut vm, &quiz_loop, intent, frame, notice).await {
                        QuizStep::Continue => {}
                        QuizStep::Finished(summary) => {
                            finish(session, screen, summary, notice).await;
                            break;
                        }
                        // Every earlier write has landed, so clearing storage here is final.
                        QuizStep::Stopped => {
                            if logout(Arc::clone(&session), screen, notice).await {
                                break;
                            }
                        }
                    }
                }
            }
        })
    };

    use_future(move || async move {
        loop {
            tokio::time::sleep(TIMER_INTERVAL).await;
            if frame.peek().is_some() {
                driver.send(QuizIntent::Tick);
            }
        }
    });

    let pick = use_callback(move |option: String| {
        let Some((from, locked)) = frame.peek().as_ref().map(|vm| (vm.index, vm.locked)) else {
            return;
        };
        if locked {
            return;
        }
        driver.send(QuizIntent::Select(option));
        spawn(async move {
            tokio::time::sleep(AUTO_ADVANCE_DELAY).await;
            driver.send(QuizIntent::Advance { from });
        });
    });

    let on_key = move |evt: KeyboardEvent| {
        let Key::Character(value) = evt.data.key() else {
            return;
        };
        let Some(index) = option_index_for_key(&value) else {
            return;
        };
        let option = frame
            .peek()
            .as_ref()
            .and_then(|vm| vm.options.get(index))
            .map(|option| option.text.clone());
        if let Some(option) = option {
            evt.prevent_default();
            pick.call(option);
        }
    };

    // Once the driver holds a run, logging out goes through it so no snapshot
    // write can land after storage is cleared.
    let on_logout = use_callback(move |()| {
        if frame.peek().is_some() {
            driver.send(QuizIntent::Leave);
        } else {
            spawn_logout(session.clone(), screen, notice);
        }
    });

    #[cfg(test)]
    {
        use_hook(|| {
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(driver, pick, on_logout);
            }
        });
    }

    let username = user.username().as_str().to_owned();
    let initial = user.username().initial();
    let state = ViewState::resolve(frame(), load_error());

    rsx! {
        div { class: "quiz-container fade-in", id: "quiz-root", tabindex: "0", onkeydown: on_key,
            div { class: "quiz-header",
                div { class: "quiz-header-top",
                    div { class: "user-info",
                        div { class: "user-avatar", "{initial}" }
                        span { class: "username", "{username}" }
                    }
                    button {
                        class: "btn-logout",
                        title: "Logout",
                        r#type: "button",
                        onclick: move |_| on_logout.call(()),
                        "Logout"
                    }
                }
            }

            match state {
                ViewState::Loading => rsx! {
                    div { class: "loading-container",
                        div { class: "loader" }
                        p { "Loading questions..." }
                    }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "quiz-error card",
                        p { class: "error-message", "{err.message()}" }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| on_logout.call(()),
                            "Log out"
                        }
                    }
                },
                ViewState::Ready(vm) => rsx! {
                    QuizBody { vm, on_pick: pick }
                },
            }

            if let Some(err) = notice() {
                p { class: "quiz-notice", "{err.message()}" }
            }
        }
    }
}

#[component]
fn QuizBody(vm: QuizScreenVm, on_pick: Callback<String>) -> Element {
    let timer_class = if vm.timer_warning {
        "stat-value time-warning"
    } else {
        "stat-value"
    };

    rsx! {
        div { class: "quiz-stats",
            div { class: "stat-card",
                span { class: "stat-value", "{vm.counter_label}" }
                span { class: "stat-label", "Questions" }
            }
            div { class: "stat-card",
                span { class: timer_class, "{vm.timer_label}" }
                span { class: "stat-label", "Time Left" }
            }
            div { class: "stat-card",
                span { class: "stat-value", "{vm.answered}" }
                span { class: "stat-label", "Answered" }
            }
        }
        div { class: "progress-bar-container",
            div { class: "progress-bar", style: "width: {vm.progress_pct}%" }
        }

        div { class: "quiz-content card scale-in",
            div { class: "question-number", "{vm.question_label}" }
            h2 { class: "question-text", "{vm.question_text}" }
            div { class: "options-container",
                for option in vm.options.iter().cloned() {
                    OptionButton {
                        key: "{option.letter}",
                        letter: option.letter,
                        text: option.text,
                        selected: option.selected,
                        disabled: vm.locked,
                        on_pick,
                    }
                }
            }
        }
    }
}

#[component]
fn OptionButton(
    letter: char,
    text: String,
    selected: bool,
    disabled: bool,
    on_pick: Callback<String>,
) -> Element {
    let class = if selected {
        "option-card selected"
    } else {
        "option-card"
    };
    let value = text.clone();

    rsx! {
        button {
            class,
            r#type: "button",
            disabled,
            onclick: move |_| on_pick.call(value.clone()),
            span { class: "option-letter", "{letter}" }
            span { class: "option-text", "{text}" }
        }
    }
}
