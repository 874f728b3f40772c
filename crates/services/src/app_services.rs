use std::sync::Arc;

use quiz_core::model::QuizSettings;
use storage::{SessionStore, Storage};

use crate::error::AppServicesError;
use crate::quiz_loop::QuizLoopService;
use crate::session_service::SessionService;
use crate::trivia_client::{OpenTriviaClient, QuestionSource};
use crate::Clock;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    settings: QuizSettings,
    session: Arc<SessionService>,
    quiz_loop: Arc<QuizLoopService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and the Open Trivia client.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        settings: QuizSettings,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let source: Arc<dyn QuestionSource> = Arc::new(OpenTriviaClient::new(settings.clone()));
        Ok(Self::from_storage(&storage, clock, settings, source))
    }

    /// Build services over an existing backend and question source.
    #[must_use]
    pub fn from_storage(
        storage: &Storage,
        clock: Clock,
        settings: QuizSettings,
        source: Arc<dyn QuestionSource>,
    ) -> Self {
        let store = SessionStore::new(Arc::clone(&storage.local_state));
        let session = Arc::new(SessionService::new(clock, store.clone()));
        let quiz_loop = Arc::new(QuizLoopService::new(clock, source, store, &settings));

        Self {
            settings,
            session,
            quiz_loop,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn session(&self) -> Arc<SessionService> {
        Arc::clone(&self.session)
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}
