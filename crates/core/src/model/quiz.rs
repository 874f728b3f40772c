use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{AnswerMap, Question, ResultsSummary};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizRunError {
    #[error("quiz batch is empty")]
    EmptyBatch,
    #[error("time limit must be positive")]
    ZeroTimeLimit,
    #[error("current index {index} is out of range for {total} questions")]
    IndexOutOfRange { index: usize, total: usize },
    #[error("remaining time {time_left}s is outside 1..={time_limit}s")]
    TimeOutOfRange { time_left: u32, time_limit: u32 },
    #[error("answer recorded for unknown question {0}")]
    UnknownQuestion(u32),
    #[error("option is not part of the current question")]
    UnknownOption,
}

/// Serializable state of an in-progress run, used to resume after a restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSnapshot {
    pub questions: Vec<Question>,
    pub current_index: usize,
    pub answers: AnswerMap,
    pub time_left: u32,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Running { time_left: u32 },
    Expired(ResultsSummary),
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Accepted,
    /// Input is locked for this question, or the run already finished.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    Next { index: usize },
    Completed(ResultsSummary),
    Ignored,
}

/// Questions, answers and countdown of one quiz run.
///
/// The run is a pure state machine: callers drive it with [`QuizRun::tick`]
/// once per second and with [`QuizRun::advance`] after the auto-advance delay.
/// Once completed every further input is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRun {
    questions: Vec<Question>,
    current_index: usize,
    answers: AnswerMap,
    time_left: u32,
    time_limit: u32,
    selected: Option<String>,
    completed: bool,
}

impl QuizRun {
    /// Start a fresh run over a fetched batch.
    ///
    /// # Errors
    ///
    /// Returns `QuizRunError::EmptyBatch` for an empty batch and
    /// `QuizRunError::ZeroTimeLimit` for a zero countdown.
    pub fn new(questions: Vec<Question>, time_limit: u32) -> Result<Self, QuizRunError> {
        if questions.is_empty() {
            return Err(QuizRunError::EmptyBatch);
        }
        if time_limit == 0 {
            return Err(QuizRunError::ZeroTimeLimit);
        }
        Ok(Self {
            questions,
            current_index: 0,
            answers: AnswerMap::new(),
            time_left: time_limit,
            time_limit,
            selected: None,
            completed: false,
        })
    }

    /// Rebuild a run from a persisted snapshot.
    ///
    /// If the current question already has an answer (the app closed during
    /// the auto-advance delay) the input stays locked so the caller can
    /// schedule the pending advance.
    ///
    /// # Errors
    ///
    /// Returns `QuizRunError` when the snapshot is inconsistent with itself or
    /// with `time_limit`.
    pub fn resume(snapshot: QuizSnapshot, time_limit: u32) -> Result<Self, QuizRunError> {
        let mut run = Self::new(snapshot.questions, time_limit)?;
        let total = run.questions.len();
        if snapshot.current_index >= total {
            return Err(QuizRunError::IndexOutOfRange {
                index: snapshot.current_index,
                total,
            });
        }
        if snapshot.time_left == 0 || snapshot.time_left > time_limit {
            return Err(QuizRunError::TimeOutOfRange {
                time_left: snapshot.time_left,
                time_limit,
            });
        }
        for (id, _) in snapshot.answers.iter() {
            if !run.questions.iter().any(|q| q.id() == id) {
                return Err(QuizRunError::UnknownQuestion(id.value()));
            }
        }

        run.current_index = snapshot.current_index;
        run.time_left = snapshot.time_left;
        run.answers = snapshot.answers;
        run.selected = run
            .current_question()
            .and_then(|q| run.answers.get(q.id()))
            .map(str::to_owned);
        Ok(run)
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    #[must_use]
    pub fn time_limit(&self) -> u32 {
        self.time_limit
    }

    /// The option picked for the current question, if input is locked.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.selected.is_some()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Count down one second; reaching zero completes the run.
    pub fn tick(&mut self) -> TickOutcome {
        if self.completed {
            return TickOutcome::Ignored;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            return TickOutcome::Expired(self.complete());
        }
        TickOutcome::Running {
            time_left: self.time_left,
        }
    }

    /// Record an answer for the current question and lock input.
    ///
    /// # Errors
    ///
    /// Returns `QuizRunError::UnknownOption` if `option` is not one of the
    /// current question's options.
    pub fn select_answer(&mut self, option: &str) -> Result<SelectOutcome, QuizRunError> {
        if self.completed || self.selected.is_some() {
            return Ok(SelectOutcome::Ignored);
        }
        let Some(question) = self.questions.get(self.current_index) else {
            return Ok(SelectOutcome::Ignored);
        };
        if !question.has_option(option) {
            return Err(QuizRunError::UnknownOption);
        }
        if !self.answers.record(question.id(), option) {
            return Ok(SelectOutcome::Ignored);
        }
        self.selected = Some(option.to_owned());
        Ok(SelectOutcome::Accepted)
    }

    /// Move past an answered question, completing the run after the last one.
    pub fn advance(&mut self) -> AdvanceOutcome {
        if self.completed || self.selected.is_none() {
            return AdvanceOutcome::Ignored;
        }
        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            self.selected = None;
            return AdvanceOutcome::Next {
                index: self.current_index,
            };
        }
        AdvanceOutcome::Completed(self.complete())
    }

    /// Summary of the run as it stands; `time_spent` is `time_limit - time_left`.
    #[must_use]
    pub fn summary(&self) -> ResultsSummary {
        ResultsSummary::tally(
            self.questions.clone(),
            self.answers.clone(),
            self.time_limit.saturating_sub(self.time_left),
        )
    }

    #[must_use]
    pub fn snapshot(&self, at: DateTime<Utc>) -> QuizSnapshot {
        QuizSnapshot {
            questions: self.questions.clone(),
            current_index: self.current_index,
            answers: self.answers.clone(),
            time_left: self.time_left,
            timestamp: at,
        }
    }

    fn complete(&mut self) -> ResultsSummary {
        self.completed = true;
        self.summary()
    }
}
