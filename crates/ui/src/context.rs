use std::sync::Arc;

use quiz_core::model::SessionScreen;
use services::{QuizLoopService, SessionService};

pub trait UiApp: Send + Sync {
    fn session(&self) -> Arc<SessionService>;
    fn quiz_loop(&self) -> Arc<QuizLoopService>;

    /// Screen restored from persisted state at startup.
    fn initial_screen(&self) -> SessionScreen;
}

#[derive(Clone)]
pub struct AppContext {
    session: Arc<SessionService>,
    quiz_loop: Arc<QuizLoopService>,
    initial_screen: SessionScreen,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            session: app.session(),
            quiz_loop: app.quiz_loop(),
            initial_screen: app.initial_screen(),
        }
    }

    #[must_use]
    pub fn session(&self) -> Arc<SessionService> {
        Arc::clone(&self.session)
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    #[must_use]
    pub fn initial_screen(&self) -> SessionScreen {
        self.initial_screen.clone()
    }
}

// Provided by the composition root in `crates/app`.

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
