use quiz_core::model::{AdvanceOutcome, QuizRun, QuizSnapshot, ResultsSummary, TickOutcome};
use quiz_core::text::{option_letter, progress_percentage};
use quiz_core::time::{format_time, is_time_warning};
use services::{QuizError, QuizLoopService};

/// Commands fed to the quiz driver task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Tick,
    Select(String),
    /// Advance only if the run still shows question `from`.
    Advance { from: usize },
    /// Stop driving the run; nothing is persisted after it.
    Leave,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizStep {
    Continue,
    Finished(ResultsSummary),
    Stopped,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub letter: char,
    pub text: String,
    pub selected: bool,
}

/// Everything the quiz screen renders for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct QuizScreenVm {
    pub index: usize,
    pub counter_label: String,
    pub question_label: String,
    pub question_text: String,
    pub options: Vec<OptionVm>,
    pub locked: bool,
    pub timer_label: String,
    pub timer_warning: bool,
    pub answered: usize,
    pub progress_pct: f64,
}

/// Owns the run for the lifetime of the quiz screen.
pub struct QuizVm {
    run: QuizRun,
}

impl QuizVm {
    /// Resume or fetch a run through the quiz loop.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` when no batch can be loaded.
    pub async fn start(
        quiz_loop: &QuizLoopService,
        resume: Option<QuizSnapshot>,
    ) -> Result<Self, QuizError> {
        let run = quiz_loop.start(resume).await?.into_run();
        Ok(Self { run })
    }

    #[must_use]
    pub fn run(&self) -> &QuizRun {
        &self.run
    }

    /// The advance still owed when a run resumes with its current question
    /// already answered.
    #[must_use]
    pub fn pending_advance(&self) -> Option<QuizIntent> {
        self.run.is_locked().then_some(QuizIntent::Advance {
            from: self.run.current_index(),
        })
    }

    /// Apply one intent and persist the result.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if the intent is invalid or persistence fails.
    pub async fn dispatch(
        &mut self,
        quiz_loop: &QuizLoopService,
        intent: QuizIntent,
    ) -> Result<QuizStep, QuizError> {
        match intent {
            QuizIntent::Tick => match quiz_loop.tick(&mut self.run).await? {
                TickOutcome::Expired(summary) => Ok(QuizStep::Finished(summary)),
                TickOutcome::Running { .. } | TickOutcome::Ignored => Ok(QuizStep::Continue),
            },
            QuizIntent::Select(option) => {
                quiz_loop.select_answer(&mut self.run, &option).await?;
                Ok(QuizStep::Continue)
            }
            QuizIntent::Advance { from } if from == self.run.current_index() => {
                match quiz_loop.advance(&mut self.run).await? {
                    AdvanceOutcome::Completed(summary) => Ok(QuizStep::Finished(summary)),
                    AdvanceOutcome::Next { .. } | AdvanceOutcome::Ignored => {
                        Ok(QuizStep::Continue)
                    }
                }
            }
            QuizIntent::Advance { .. } => Ok(QuizStep::Continue),
            QuizIntent::Leave => Ok(QuizStep::Stopped),
        }
    }

    #[must_use]
    pub fn screen(&self) -> QuizScreenVm {
        map_quiz_screen(&self.run)
    }
}

#[must_use]
pub fn map_quiz_screen(run: &QuizRun) -> QuizScreenVm {
    let index = run.current_index();
    let total = run.total();
    let selected = run.selected();
    let (question_text, options) = run.current_question().map_or_else(
        || (String::new(), Vec::new()),
        |question| {
            let options = question
                .options()
                .iter()
                .enumerate()
                .map(|(i, text)| OptionVm {
                    letter: option_letter(i),
                    text: text.clone(),
                    selected: selected == Some(text.as_str()),
                })
                .collect();
            (question.text().to_owned(), options)
        },
    );

    QuizScreenVm {
        index,
        counter_label: format!("{} / {total}", index + 1),
        question_label: format!("Question {}", index + 1),
        question_text,
        options,
        locked: run.is_locked() || run.is_complete(),
        timer_label: format_time(run.time_left()),
        timer_warning: is_time_warning(run.time_left()),
        answered: run.answered_count(),
        progress_pct: progress_percentage(index, total),
    }
}

/// Option index picked by a key press: `1` or `a` for the first option, and so on.
#[must_use]
pub fn option_index_for_key(key: &str) -> Option<usize> {
    let mut chars = key.chars();
    let first = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    match first.to_ascii_lowercase() {
        c @ '1'..='9' => Some(c as usize - '1' as usize),
        c @ 'a'..='z' => Some(c as usize - 'a' as usize),
        _ => None,
    }
}
