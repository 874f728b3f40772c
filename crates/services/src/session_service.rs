use chrono::{DateTime, Utc};
use quiz_core::model::{ResultsSummary, SessionEvent, SessionScreen, User, Username};
use storage::SessionStore;
use tracing::{info, warn};

use crate::error::SessionError;
use crate::Clock;

/// Screen transitions plus the persistence each one implies.
///
/// The service holds no screen state of its own; callers pass the current
/// screen in and keep whatever comes back.
#[derive(Clone)]
pub struct SessionService {
    clock: Clock,
    store: SessionStore,
}

impl SessionService {
    #[must_use]
    pub fn new(clock: Clock, store: SessionStore) -> Self {
        Self { clock, store }
    }

    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Pick the startup screen from persisted state.
    ///
    /// A stored user with a stored snapshot resumes the quiz; anything else
    /// starts at login. A snapshot without a user is stale and is removed.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the backend cannot be read.
    pub async fn restore(&self) -> Result<SessionScreen, SessionError> {
        let user = self.store.load_user().await?;
        let snapshot = self.store.load_snapshot().await?;

        match (user, snapshot) {
            (Some(user), Some(snapshot)) => {
                info!(
                    user = user.username().as_str(),
                    index = snapshot.current_index,
                    "restoring quiz in progress"
                );
                Ok(SessionScreen::Quiz {
                    user,
                    resume: Some(snapshot),
                })
            }
            (None, Some(_)) => {
                warn!("quiz progress found without a user; discarding it");
                self.store.clear_snapshot().await?;
                Ok(SessionScreen::Login)
            }
            (_, None) => Ok(SessionScreen::Login),
        }
    }

    /// Validate `raw_name`, persist the user, and move to the quiz.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Username` for a rejected name (nothing is
    /// persisted), `SessionError::InvalidTransition` outside the login
    /// screen, and `SessionError::Storage` if the user cannot be saved.
    pub async fn login(
        &self,
        current: &SessionScreen,
        raw_name: &str,
    ) -> Result<SessionScreen, SessionError> {
        let username = Username::parse(raw_name)?;
        let user = User::new(username, self.now());
        let next = current.apply(SessionEvent::LoggedIn(user.clone()))?;

        self.store.save_user(&user).await?;
        info!(user = user.username().as_str(), "logged in");
        Ok(next)
    }

    /// Show results and drop the finished run's snapshot.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless a quiz is running and
    /// `SessionError::Storage` if the snapshot cannot be removed.
    pub async fn complete(
        &self,
        current: &SessionScreen,
        summary: ResultsSummary,
    ) -> Result<SessionScreen, SessionError> {
        let correct = summary.correct_count();
        let total = summary.total_questions();
        let next = current.apply(SessionEvent::Completed(summary))?;

        self.store.clear_snapshot().await?;
        info!(correct, total, "quiz completed");
        Ok(next)
    }

    /// Start another run for the same user.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside the results screen
    /// and `SessionError::Storage` if the snapshot cannot be removed.
    pub async fn restart(&self, current: &SessionScreen) -> Result<SessionScreen, SessionError> {
        let next = current.apply(SessionEvent::Restart)?;
        self.store.clear_snapshot().await?;
        info!("quiz restarted");
        Ok(next)
    }

    /// Forget the user and any progress. Valid from every screen.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the entries cannot be removed.
    pub async fn logout(&self, current: &SessionScreen) -> Result<SessionScreen, SessionError> {
        let next = current.apply(SessionEvent::Logout)?;
        self.store.clear_all().await?;
        info!("logged out");
        Ok(next)
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}
