#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod quiz_loop;
pub mod session_service;
pub mod trivia_client;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, FetchError, QuizError, SessionError};
pub use quiz_loop::{QuizLoopService, QuizStart};
pub use session_service::SessionService;
pub use trivia_client::{OpenTriviaClient, QuestionSource};
