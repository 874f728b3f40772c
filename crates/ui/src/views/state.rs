use services::{QuizError, SessionError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    FetchFailed,
    Storage,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::FetchFailed => "Failed to load questions. Please try again later.",
            Self::Storage => "Your progress could not be saved.",
            Self::Unknown => "Something went wrong. Please try again.",
        }
    }

    #[must_use]
    pub fn from_quiz(err: &QuizError) -> Self {
        match err {
            QuizError::Fetch(_) => Self::FetchFailed,
            QuizError::Storage(_) => Self::Storage,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn from_session(err: &SessionError) -> Self {
        match err {
            SessionError::Storage(_) => Self::Storage,
            _ => Self::Unknown,
        }
    }
}

/// Lifecycle of a screen that loads before it becomes interactive.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Ready(T),
    Error(ViewError),
}

impl<T> ViewState<T> {
    /// Collapse a loaded value and a pending error into one state; the error wins.
    #[must_use]
    pub fn resolve(value: Option<T>, error: Option<ViewError>) -> Self {
        match (value, error) {
            (_, Some(err)) => Self::Error(err),
            (Some(value), None) => Self::Ready(value),
            (None, None) => Self::Loading,
        }
    }
}
