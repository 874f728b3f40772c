use std::sync::Arc;

use quiz_core::model::{
    AdvanceOutcome, QuizRun, QuizSettings, QuizSnapshot, SelectOutcome, TickOutcome,
};
use storage::SessionStore;
use tracing::{debug, info, trace, warn};

use crate::error::QuizError;
use crate::trivia_client::QuestionSource;
use crate::Clock;

/// How a run was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizStart {
    Fresh(QuizRun),
    Resumed(QuizRun),
}

impl QuizStart {
    #[must_use]
    pub fn into_run(self) -> QuizRun {
        match self {
            Self::Fresh(run) | Self::Resumed(run) => run,
        }
    }

    #[must_use]
    pub fn is_resumed(&self) -> bool {
        matches!(self, Self::Resumed(_))
    }
}

/// Orchestrates a quiz run: batch loading, countdown, answers, and the
/// snapshot writes that make the run resumable.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    source: Arc<dyn QuestionSource>,
    store: SessionStore,
    time_limit: u32,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        source: Arc<dyn QuestionSource>,
        store: SessionStore,
        settings: &QuizSettings,
    ) -> Self {
        Self {
            clock,
            source,
            store,
            time_limit: settings.time_limit_secs(),
        }
    }

    #[must_use]
    pub fn time_limit(&self) -> u32 {
        self.time_limit
    }

    /// Resume from `resume` when it is usable, otherwise fetch a new batch.
    ///
    /// An unusable snapshot is dropped from storage before fetching.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Fetch` when the batch cannot be loaded and
    /// `QuizError::Storage` when the initial snapshot cannot be written.
    pub async fn start(&self, resume: Option<QuizSnapshot>) -> Result<QuizStart, QuizError> {
        if let Some(snapshot) = resume {
            match QuizRun::resume(snapshot, self.time_limit) {
                Ok(run) => {
                    info!(
                        index = run.current_index(),
                        time_left = run.time_left(),
                        "resuming quiz from snapshot"
                    );
                    return Ok(QuizStart::Resumed(run));
                }
                Err(err) => {
                    warn!(error = %err, "stored quiz snapshot is unusable; starting fresh");
                    self.store.clear_snapshot().await?;
                }
            }
        }

        let questions = self.source.fetch_batch().await.inspect_err(|err| {
            warn!(error = %err, "failed to load questions");
        })?;
        let run = QuizRun::new(questions, self.time_limit)?;
        self.persist(&run).await?;
        info!(total = run.total(), "quiz started");
        Ok(QuizStart::Fresh(run))
    }

    /// Count down one second and persist the new remaining time.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Storage` if the snapshot cannot be written.
    pub async fn tick(&self, run: &mut QuizRun) -> Result<TickOutcome, QuizError> {
        let outcome = run.tick();
        match &outcome {
            TickOutcome::Running { time_left } => {
                trace!(time_left, "tick");
                self.persist(run).await?;
            }
            TickOutcome::Expired(summary) => {
                info!(answered = summary.answered_count(), "quiz time expired");
            }
            TickOutcome::Ignored => {}
        }
        Ok(outcome)
    }

    /// Record an answer for the current question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Run` for options that do not belong to the
    /// question and `QuizError::Storage` if the snapshot cannot be written.
    pub async fn select_answer(
        &self,
        run: &mut QuizRun,
        option: &str,
    ) -> Result<SelectOutcome, QuizError> {
        let outcome = run.select_answer(option)?;
        if outcome == SelectOutcome::Accepted {
            debug!(index = run.current_index(), "answer recorded");
            self.persist(run).await?;
        }
        Ok(outcome)
    }

    /// Move past the answered question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Storage` if the snapshot cannot be written.
    pub async fn advance(&self, run: &mut QuizRun) -> Result<AdvanceOutcome, QuizError> {
        let outcome = run.advance();
        match &outcome {
            AdvanceOutcome::Next { index } => {
                debug!(index, "advanced to next question");
                self.persist(run).await?;
            }
            AdvanceOutcome::Completed(summary) => {
                info!(
                    correct = summary.correct_count(),
                    total = summary.total_questions(),
                    "all questions answered"
                );
            }
            AdvanceOutcome::Ignored => {}
        }
        Ok(outcome)
    }

    async fn persist(&self, run: &QuizRun) -> Result<(), QuizError> {
        self.store
            .save_snapshot(&run.snapshot(self.clock.now()))
            .await?;
        Ok(())
    }
}
