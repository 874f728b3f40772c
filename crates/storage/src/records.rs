//! Persisted JSON shapes for the local state entries.
//!
//! These mirror the domain types so the stored layout stays stable and
//! readable (camelCase keys, answers keyed by question id) without leaking
//! serde concerns into `quiz-core`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use quiz_core::model::{
    AnswerMap, Question, QuestionError, QuestionId, QuizSnapshot, User, Username, UsernameError,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub username: String,
    pub login_time: DateTime<Utc>,
}

impl UserRecord {
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username().as_str().to_owned(),
            login_time: user.login_time(),
        }
    }

    /// Convert the record back into a domain `User`.
    ///
    /// # Errors
    ///
    /// Returns `UsernameError` if the stored name no longer validates.
    pub fn into_user(self) -> Result<User, UsernameError> {
        let username = Username::parse(&self.username)?;
        Ok(User::new(username, self.login_time))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub id: u32,
    pub question: String,
    pub correct_answer: String,
    pub options: Vec<String>,
    #[serde(rename = "type")]
    pub kind: String,
}

impl QuestionRecord {
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        Self {
            id: question.id().value(),
            question: question.text().to_owned(),
            correct_answer: question.correct_answer().to_owned(),
            options: question.options().to_vec(),
            kind: question.kind().to_owned(),
        }
    }

    /// # Errors
    ///
    /// Returns `QuestionError` if the stored question is inconsistent.
    pub fn into_question(self) -> Result<Question, QuestionError> {
        Question::new(
            QuestionId::new(self.id),
            self.question,
            self.correct_answer,
            self.options,
            self.kind,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRecord {
    pub questions: Vec<QuestionRecord>,
    pub current_index: usize,
    #[serde(default)]
    pub answers: BTreeMap<u32, String>,
    pub time_left: u32,
    pub timestamp: DateTime<Utc>,
}

impl SnapshotRecord {
    #[must_use]
    pub fn from_snapshot(snapshot: &QuizSnapshot) -> Self {
        Self {
            questions: snapshot
                .questions
                .iter()
                .map(QuestionRecord::from_question)
                .collect(),
            current_index: snapshot.current_index,
            answers: snapshot
                .answers
                .iter()
                .map(|(id, answer)| (id.value(), answer.to_owned()))
                .collect(),
            time_left: snapshot.time_left,
            timestamp: snapshot.timestamp,
        }
    }

    /// # Errors
    ///
    /// Returns `QuestionError` if any stored question is inconsistent.
    pub fn into_snapshot(self) -> Result<QuizSnapshot, QuestionError> {
        let questions = self
            .questions
            .into_iter()
            .map(QuestionRecord::into_question)
            .collect::<Result<Vec<_>, _>>()?;
        let answers: AnswerMap = self
            .answers
            .into_iter()
            .map(|(id, answer)| (QuestionId::new(id), answer))
            .collect();

        Ok(QuizSnapshot {
            questions,
            current_index: self.current_index,
            answers,
            time_left: self.time_left,
            timestamp: self.timestamp,
        })
    }
}
