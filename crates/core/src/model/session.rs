use thiserror::Error;

use crate::model::{QuizSnapshot, ResultsSummary, User};

/// The screen currently shown; exactly one is active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionScreen {
    #[default]
    Login,
    Quiz {
        user: User,
        /// Snapshot to resume from instead of fetching a new batch.
        resume: Option<QuizSnapshot>,
    },
    Results {
        user: User,
        summary: ResultsSummary,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Login,
    Quiz,
    Results,
}

/// Triggers that move the session between screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedIn(User),
    Completed(ResultsSummary),
    Restart,
    Logout,
}

impl SessionEvent {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoggedIn(_) => "login",
            Self::Completed(_) => "complete",
            Self::Restart => "restart",
            Self::Logout => "logout",
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("cannot {event} from the {from:?} screen")]
pub struct InvalidTransition {
    pub from: ScreenKind,
    pub event: &'static str,
}

impl SessionScreen {
    /// Apply a transition.
    ///
    /// Valid moves are Login to Quiz on login, Quiz to Results on completion,
    /// Results to a fresh Quiz on restart, and any screen to Login on logout.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` for any other combination; the caller keeps
    /// its current screen.
    pub fn apply(&self, event: SessionEvent) -> Result<SessionScreen, InvalidTransition> {
        match (self, event) {
            (Self::Login, SessionEvent::LoggedIn(user)) => Ok(Self::Quiz { user, resume: None }),
            (Self::Quiz { user, .. }, SessionEvent::Completed(summary)) => Ok(Self::Results {
                user: user.clone(),
                summary,
            }),
            (Self::Results { user, .. }, SessionEvent::Restart) => Ok(Self::Quiz {
                user: user.clone(),
                resume: None,
            }),
            (_, SessionEvent::Logout) => Ok(Self::Login),
            (screen, event) => Err(InvalidTransition {
                from: screen.kind(),
                event: event.name(),
            }),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ScreenKind {
        match self {
            Self::Login => ScreenKind::Login,
            Self::Quiz { .. } => ScreenKind::Quiz,
            Self::Results { .. } => ScreenKind::Results,
        }
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Login => None,
            Self::Quiz { user, .. } | Self::Results { user, .. } => Some(user),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnswerMap, Username};
    use crate::time::fixed_now;

    #[test]
    fn login_has_no_user() {
        let screen = SessionScreen::default();
        assert_eq!(screen.kind(), ScreenKind::Login);
        assert!(screen.user().is_none());
    }

    fn user() -> User {
        User::new(Username::parse("Ada").unwrap(), fixed_now())
    }

    fn summary() -> ResultsSummary {
        ResultsSummary::tally(Vec::new(), AnswerMap::new(), 0)
    }

    #[test]
    fn full_cycle_of_valid_transitions() {
        let quiz = SessionScreen::Login
            .apply(SessionEvent::LoggedIn(user()))
            .unwrap();
        assert_eq!(quiz, SessionScreen::Quiz { user: user(), resume: None });

        let results = quiz.apply(SessionEvent::Completed(summary())).unwrap();
        assert_eq!(results.kind(), ScreenKind::Results);

        let again = results.apply(SessionEvent::Restart).unwrap();
        assert_eq!(again, SessionScreen::Quiz { user: user(), resume: None });

        assert_eq!(again.apply(SessionEvent::Logout).unwrap(), SessionScreen::Login);
    }

    #[test]
    fn logout_is_valid_everywhere() {
        assert_eq!(
            SessionScreen::Login.apply(SessionEvent::Logout).unwrap(),
            SessionScreen::Login
        );
        let results = SessionScreen::Results {
            user: user(),
            summary: summary(),
        };
        assert_eq!(results.apply(SessionEvent::Logout).unwrap(), SessionScreen::Login);
    }

    #[test]
    fn other_transitions_are_rejected() {
        let err = SessionScreen::Login.apply(SessionEvent::Restart).unwrap_err();
        assert_eq!(err.from, ScreenKind::Login);
        assert_eq!(err.event, "restart");

        let quiz = SessionScreen::Quiz {
            user: user(),
            resume: None,
        };
        assert!(quiz.apply(SessionEvent::LoggedIn(user())).is_err());
        assert!(quiz.apply(SessionEvent::Restart).is_err());
        assert!(SessionScreen::Login
            .apply(SessionEvent::Completed(summary()))
            .is_err());
    }

    #[test]
    fn results_carry_the_user() {
        let user = User::new(Username::parse("Ada").unwrap(), fixed_now());
        let screen = SessionScreen::Results {
            user: user.clone(),
            summary: ResultsSummary::tally(Vec::new(), AnswerMap::new(), 0),
        };
        assert_eq!(screen.kind(), ScreenKind::Results);
        assert_eq!(screen.user(), Some(&user));
    }
}
