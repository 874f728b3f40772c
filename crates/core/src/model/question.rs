use rand::Rng;
use thiserror::Error;

use crate::model::QuestionId;
use crate::text::shuffle;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text is empty")]
    EmptyText,
    #[error("question needs at least two options, got {0}")]
    TooFewOptions(usize),
    #[error("correct answer must appear exactly once among the options (found {0})")]
    CorrectAnswerCount(usize),
}

/// A single multiple-choice question, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    correct_answer: String,
    options: Vec<String>,
    kind: String,
}

impl Question {
    /// Build a question from already-ordered options.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the text is blank, fewer than two options are
    /// given, or the correct answer does not appear exactly once.
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        correct_answer: impl Into<String>,
        options: Vec<String>,
        kind: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        let correct_answer = correct_answer.into();
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if options.len() < 2 {
            return Err(QuestionError::TooFewOptions(options.len()));
        }
        let hits = options.iter().filter(|o| **o == correct_answer).count();
        if hits != 1 {
            return Err(QuestionError::CorrectAnswerCount(hits));
        }

        Ok(Self {
            id,
            text,
            correct_answer,
            options,
            kind: kind.into(),
        })
    }

    /// Build a question with the correct answer mixed into the incorrect ones
    /// at a random position. Incorrect answers that repeat the correct one
    /// are dropped.
    ///
    /// # Errors
    ///
    /// Same as [`Question::new`].
    pub fn shuffled<R: Rng + ?Sized>(
        id: QuestionId,
        text: impl Into<String>,
        correct_answer: impl Into<String>,
        incorrect_answers: Vec<String>,
        kind: impl Into<String>,
        rng: &mut R,
    ) -> Result<Self, QuestionError> {
        let correct_answer = correct_answer.into();
        let mut options = Vec::with_capacity(incorrect_answers.len() + 1);
        options.push(correct_answer.clone());
        options.extend(
            incorrect_answers
                .into_iter()
                .filter(|answer| *answer != correct_answer),
        );
        shuffle(&mut options, rng);
        Self::new(id, text, correct_answer, options, kind)
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Source question type, e.g. `multiple`.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[must_use]
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    #[must_use]
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }
}
