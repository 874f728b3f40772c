use quiz_core::model::ResultsSummary;
use quiz_core::time::format_time_spent;

/// Scores at or above this percentage get the celebration banner.
const CELEBRATE_FROM_PCT: u32 = 70;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReviewOutcome {
    Correct,
    Wrong,
    Unanswered,
}

impl ReviewOutcome {
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Correct => "review-row correct",
            Self::Wrong => "review-row wrong",
            Self::Unanswered => "review-row unanswered",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewRowVm {
    pub number: usize,
    pub question: String,
    pub your_answer: String,
    pub correct_answer: String,
    pub outcome: ReviewOutcome,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub percentage_label: String,
    pub grade_label: &'static str,
    pub grade_message: &'static str,
    pub grade_color: &'static str,
    pub correct: u32,
    pub wrong: u32,
    pub unanswered: u32,
    pub total: u32,
    pub time_spent_label: String,
    pub score_label: String,
    pub celebrate: bool,
    pub review: Vec<ReviewRowVm>,
}

#[must_use]
pub fn map_results(summary: &ResultsSummary) -> ResultsVm {
    let percentage = summary.score_percentage();
    let grade = summary.grade();
    let review = summary
        .questions()
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let answer = summary
                .answers()
                .get(question.id())
                .filter(|answer| !answer.is_empty());
            let outcome = match answer {
                None => ReviewOutcome::Unanswered,
                Some(answer) if question.is_correct(answer) => ReviewOutcome::Correct,
                Some(_) => ReviewOutcome::Wrong,
            };
            ReviewRowVm {
                number: i + 1,
                question: question.text().to_owned(),
                your_answer: answer.unwrap_or("No answer").to_owned(),
                correct_answer: question.correct_answer().to_owned(),
                outcome,
            }
        })
        .collect();

    ResultsVm {
        percentage_label: format!("{percentage}%"),
        grade_label: grade.label(),
        grade_message: grade.message(),
        grade_color: grade.color(),
        correct: summary.correct_count(),
        wrong: summary.wrong_count(),
        unanswered: summary.unanswered_count(),
        total: summary.total_questions(),
        time_spent_label: format_time_spent(summary.time_spent()),
        score_label: format!("{} / {}", summary.correct_count(), summary.total_questions()),
        celebrate: percentage >= CELEBRATE_FROM_PCT,
        review,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{AnswerMap, Question, QuestionId};

    fn summary() -> ResultsSummary {
        let questions: Vec<Question> = (0..10)
            .map(|id| {
                Question::new(
                    QuestionId::new(id),
                    format!("Q{id}"),
                    "right",
                    vec!["wrong".into(), "right".into()],
                    "multiple",
                )
                .unwrap()
            })
            .collect();
        let mut answers = AnswerMap::new();
        for id in 0..7 {
            answers.record(QuestionId::new(id), "right");
        }
        answers.record(QuestionId::new(7), "wrong");
        ResultsSummary::tally(questions, answers, 330)
    }

    #[test]
    fn maps_scores_and_grade() {
        let vm = map_results(&summary());
        assert_eq!(vm.percentage_label, "70%");
        assert_eq!(vm.grade_label, "B");
        assert_eq!(vm.grade_message, "Great Job!");
        assert_eq!(vm.correct, 7);
        assert_eq!(vm.wrong, 1);
        assert_eq!(vm.unanswered, 2);
        assert_eq!(vm.score_label, "7 / 10");
        assert_eq!(vm.time_spent_label, "5m 30s");
        assert!(vm.celebrate);
    }

    #[test]
    fn review_rows_classify_each_question() {
        let vm = map_results(&summary());
        assert_eq!(vm.review.len(), 10);
        assert_eq!(vm.review[0].outcome, ReviewOutcome::Correct);
        assert_eq!(vm.review[7].outcome, ReviewOutcome::Wrong);
        assert_eq!(vm.review[7].your_answer, "wrong");
        assert_eq!(vm.review[9].outcome, ReviewOutcome::Unanswered);
        assert_eq!(vm.review[9].your_answer, "No answer");
        assert_eq!(vm.review[9].number, 10);
    }

    #[test]
    fn empty_batch_scores_zero() {
        let vm = map_results(&ResultsSummary::tally(Vec::new(), AnswerMap::new(), 0));
        assert_eq!(vm.percentage_label, "0%");
        assert_eq!(vm.grade_label, "F");
        assert!(!vm.celebrate);
        assert!(vm.review.is_empty());
    }
}
