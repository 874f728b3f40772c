use thiserror::Error;

use crate::model::{QuestionError, QuizRunError, QuizSettingsError, UsernameError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Username(#[from] UsernameError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    QuizRun(#[from] QuizRunError),
    #[error(transparent)]
    Settings(#[from] QuizSettingsError),
}
