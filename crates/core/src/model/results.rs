use crate::model::{AnswerMap, Grade, Question};

/// Score report for a finished quiz run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsSummary {
    questions: Vec<Question>,
    answers: AnswerMap,
    total_questions: u32,
    answered_count: u32,
    correct_count: u32,
    wrong_count: u32,
    time_spent: u32,
}

impl ResultsSummary {
    /// Count correct and wrong answers over the whole batch.
    ///
    /// An answer is wrong only when it is present, non-empty and differs from
    /// the correct answer, so an empty recorded answer counts as neither.
    #[must_use]
    pub fn tally(questions: Vec<Question>, answers: AnswerMap, time_spent: u32) -> Self {
        let mut correct_count = 0;
        let mut wrong_count = 0;
        for question in &questions {
            match answers.get(question.id()) {
                Some(answer) if question.is_correct(answer) => correct_count += 1,
                Some(answer) if !answer.is_empty() => wrong_count += 1,
                _ => {}
            }
        }

        Self {
            total_questions: saturating_u32(questions.len()),
            answered_count: saturating_u32(answers.len()),
            correct_count,
            wrong_count,
            time_spent,
            questions,
            answers,
        }
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn answered_count(&self) -> u32 {
        self.answered_count
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn wrong_count(&self) -> u32 {
        self.wrong_count
    }

    /// Seconds spent before completion.
    #[must_use]
    pub fn time_spent(&self) -> u32 {
        self.time_spent
    }

    #[must_use]
    pub fn unanswered_count(&self) -> u32 {
        self.total_questions.saturating_sub(self.answered_count)
    }

    /// `round(correct / total * 100)`, or 0 for an empty batch.
    #[must_use]
    pub fn score_percentage(&self) -> u32 {
        score_percentage(self.correct_count, self.total_questions)
    }

    #[must_use]
    pub fn grade(&self) -> Grade {
        Grade::from_percentage(self.score_percentage())
    }
}

/// Rounded percentage of `correct` over `total`, halves rounding up.
#[must_use]
pub fn score_percentage(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let scaled = u64::from(correct) * 100;
    let total = u64::from(total);
    let rounded = (scaled * 2 + total) / (total * 2);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
