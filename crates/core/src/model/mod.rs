mod answers;
mod grade;
mod ids;
mod question;
mod quiz;
mod results;
mod session;
mod settings;
mod user;

pub use answers::AnswerMap;
pub use grade::Grade;
pub use ids::QuestionId;
pub use question::{Question, QuestionError};
pub use quiz::{AdvanceOutcome, QuizRun, QuizRunError, QuizSnapshot, SelectOutcome, TickOutcome};
pub use results::{ResultsSummary, score_percentage};
pub use session::{InvalidTransition, ScreenKind, SessionEvent, SessionScreen};
pub use settings::{
    DEFAULT_API_URL, DEFAULT_QUESTION_COUNT, Difficulty, FILM_CATEGORY, QuestionType,
    QuizSettings, QuizSettingsDraft, QuizSettingsError,
};
pub use user::{MIN_USERNAME_LEN, User, Username, UsernameError};
