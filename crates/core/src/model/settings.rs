use thiserror::Error;
use url::Url;

use crate::time::DEFAULT_TIME_LIMIT_SECS;

pub const DEFAULT_API_URL: &str = "https://opentdb.com/api.php";
pub const DEFAULT_QUESTION_COUNT: u32 = 10;
/// Open Trivia DB category id for "Entertainment: Film".
pub const FILM_CATEGORY: u32 = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuestionType {
    #[default]
    Multiple,
    Boolean,
}

impl QuestionType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Multiple => "multiple",
            Self::Boolean => "boolean",
        }
    }
}

/// Validated quiz configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizSettings {
    api_url: Url,
    question_count: u32,
    category: u32,
    difficulty: Difficulty,
    question_type: QuestionType,
    time_limit_secs: u32,
}

#[derive(Clone, Debug, Default)]
pub struct QuizSettingsDraft {
    pub api_url: Option<String>,
    pub question_count: Option<u32>,
    pub category: Option<u32>,
    pub difficulty: Option<Difficulty>,
    pub question_type: Option<QuestionType>,
    pub time_limit_secs: Option<u32>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizSettingsError {
    #[error("invalid question source URL: {0}")]
    InvalidApiUrl(String),
    #[error("question count must be between 1 and 50")]
    InvalidQuestionCount,
    #[error("time limit must be positive")]
    InvalidTimeLimit,
}

impl QuizSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and fill in defaults.
    ///
    /// # Errors
    ///
    /// Returns `QuizSettingsError` if the URL does not parse as http(s), the
    /// question count is outside what the source serves, or the time limit is zero.
    pub fn validate(self) -> Result<QuizSettings, QuizSettingsError> {
        let raw_url = self
            .api_url
            .map(|val| val.trim().to_string())
            .filter(|val| !val.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(&raw_url)
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https"))
            .ok_or(QuizSettingsError::InvalidApiUrl(raw_url))?;

        let question_count = self.question_count.unwrap_or(DEFAULT_QUESTION_COUNT);
        if !(1..=50).contains(&question_count) {
            return Err(QuizSettingsError::InvalidQuestionCount);
        }

        let time_limit_secs = self.time_limit_secs.unwrap_or(DEFAULT_TIME_LIMIT_SECS);
        if time_limit_secs == 0 {
            return Err(QuizSettingsError::InvalidTimeLimit);
        }

        Ok(QuizSettings {
            api_url,
            question_count,
            category: self.category.unwrap_or(FILM_CATEGORY),
            difficulty: self.difficulty.unwrap_or_default(),
            question_type: self.question_type.unwrap_or_default(),
            time_limit_secs,
        })
    }
}

impl QuizSettings {
    #[must_use]
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    #[must_use]
    pub fn question_count(&self) -> u32 {
        self.question_count
    }

    #[must_use]
    pub fn category(&self) -> u32 {
        self.category
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn question_type(&self) -> QuestionType {
        self.question_type
    }

    #[must_use]
    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_secs
    }

    /// Full request URL for one batch.
    #[must_use]
    pub fn batch_url(&self) -> Url {
        let mut url = self.api_url.clone();
        url.query_pairs_mut()
            .append_pair("amount", &self.question_count.to_string())
            .append_pair("category", &self.category.to_string())
            .append_pair("difficulty", self.difficulty.as_str())
            .append_pair("type", self.question_type.as_str());
        url
    }
}
