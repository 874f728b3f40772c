mod login;
mod quiz;
mod results;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

use dioxus::prelude::*;
use quiz_core::model::SessionScreen;
use services::{SessionError, SessionService};
use std::sync::Arc;

pub use login::LoginView;
pub use quiz::QuizView;
pub use results::ResultsView;
pub use state::{ViewError, ViewState};

/// Run one session transition against the current screen and swap in the
/// result; failures are returned and the screen stays put.
async fn transition<F, Fut>(mut screen: Signal<SessionScreen>, apply: F) -> Result<(), SessionError>
where
    F: FnOnce(SessionScreen) -> Fut,
    Fut: Future<Output = Result<SessionScreen, SessionError>>,
{
    let current = screen.peek().clone();
    let next = apply(current).await?;
    screen.set(next);
    Ok(())
}

/// Log out from the current screen. Returns `false` and reports on `error`
/// when storage could not be cleared.
async fn logout(
    session: Arc<SessionService>,
    screen: Signal<SessionScreen>,
    mut error: Signal<Option<ViewError>>,
) -> bool {
    let result = transition(screen, |current| async move {
        session.logout(&current).await
    })
    .await;
    match result {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "logout failed");
            error.set(Some(ViewError::from_session(&err)));
            false
        }
    }
}

/// Logout for screens without a running quiz driver.
fn spawn_logout(
    session: Arc<SessionService>,
    screen: Signal<SessionScreen>,
    error: Signal<Option<ViewError>>,
) {
    spawn(async move {
        logout(session, screen, error).await;
    });
}
