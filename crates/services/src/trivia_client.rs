use async_trait::async_trait;
use quiz_core::model::{Question, QuestionId, QuizSettings};
use quiz_core::text::decode_html;
use rand::Rng;
use reqwest::Client;
use serde::Deserialize;

use crate::error::FetchError;

/// Source of question batches.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch one batch of decoded, shuffled questions.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` when the source is unreachable, answers with an
    /// error, or returns no usable questions.
    async fn fetch_batch(&self) -> Result<Vec<Question>, FetchError>;
}

/// Open Trivia Database client.
#[derive(Clone)]
pub struct OpenTriviaClient {
    client: Client,
    settings: QuizSettings,
}

impl OpenTriviaClient {
    #[must_use]
    pub fn new(settings: QuizSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }
}

#[async_trait]
impl QuestionSource for OpenTriviaClient {
    async fn fetch_batch(&self) -> Result<Vec<Question>, FetchError> {
        let url = self.settings.batch_url();
        tracing::debug!(%url, "requesting question batch");

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status()));
        }

        let body: TriviaResponse = response.json().await?;
        let questions = map_batch(body, &mut rand::rng())?;
        tracing::info!(count = questions.len(), "question batch loaded");
        Ok(questions)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TriviaResponse {
    #[serde(default)]
    response_code: u8,
    #[serde(default)]
    results: Vec<TriviaQuestion>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TriviaQuestion {
    #[serde(rename = "type")]
    kind: String,
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
}

/// Decode entities and shuffle options for every question in a response.
pub(crate) fn map_batch<R: Rng + ?Sized>(
    body: TriviaResponse,
    rng: &mut R,
) -> Result<Vec<Question>, FetchError> {
    if body.response_code != 0 {
        return Err(FetchError::ResponseCode(body.response_code));
    }
    if body.results.is_empty() {
        return Err(FetchError::NoResults);
    }

    body.results
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            let id = u32::try_from(index).unwrap_or(u32::MAX);
            Question::shuffled(
                QuestionId::new(id),
                decode_html(&raw.question),
                decode_html(&raw.correct_answer),
                raw.incorrect_answers
                    .iter()
                    .map(|answer| decode_html(answer))
                    .collect(),
                raw.kind,
                rng,
            )
            .map_err(|source| FetchError::InvalidQuestion { index, source })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const SAMPLE: &str = r#"{
        "response_code": 0,
        "results": [
            {
                "type": "multiple",
                "difficulty": "easy",
                "category": "Entertainment: Film",
                "question": "Which director made &quot;Jurassic Park&quot;?",
                "correct_answer": "Steven Spielberg",
                "incorrect_answers": ["James Cameron", "Ridley Scott", "George Lucas"]
            },
            {
                "type": "multiple",
                "difficulty": "easy",
                "category": "Entertainment: Film",
                "question": "What is the name of Andy&#039;s toy cowboy?",
                "correct_answer": "Woody",
                "incorrect_answers": ["Buzz", "Jessie", "Bullseye"]
            }
        ]
    }"#;

    #[test]
    fn maps_and_decodes_a_batch() {
        let body: TriviaResponse = serde_json::from_str(SAMPLE).unwrap();
        let questions = map_batch(body, &mut StdRng::seed_from_u64(5)).unwrap();

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].id(), QuestionId::new(0));
        assert_eq!(
            questions[0].text(),
            "Which director made \"Jurassic Park\"?"
        );
        assert_eq!(questions[1].text(), "What is the name of Andy's toy cowboy?");
        assert_eq!(questions[1].correct_answer(), "Woody");
        assert_eq!(questions[1].options().len(), 4);
        assert_eq!(questions[1].kind(), "multiple");
    }

    #[test]
    fn empty_results_are_an_error() {
        let body: TriviaResponse =
            serde_json::from_str(r#"{"response_code": 0, "results": []}"#).unwrap();
        assert!(matches!(
            map_batch(body, &mut StdRng::seed_from_u64(1)),
            Err(FetchError::NoResults)
        ));
    }

    #[test]
    fn non_zero_response_code_is_an_error() {
        let body: TriviaResponse =
            serde_json::from_str(r#"{"response_code": 5, "results": []}"#).unwrap();
        assert!(matches!(
            map_batch(body, &mut StdRng::seed_from_u64(1)),
            Err(FetchError::ResponseCode(5))
        ));
    }

    #[test]
    fn decoded_duplicate_of_the_correct_answer_keeps_the_batch() {
        let body: TriviaResponse = serde_json::from_str(
            r#"{"response_code": 0, "results": [
                {"type": "multiple", "question": "Q1", "correct_answer": "Woody",
                 "incorrect_answers": ["Buzz", "Jessie", "Bullseye"]},
                {"type": "multiple", "question": "Q2", "correct_answer": "Am&eacute;lie",
                 "incorrect_answers": ["Am\u00e9lie", "Delicatessen", "L&eacute;on"]}
            ]}"#,
        )
        .unwrap();
        let questions = map_batch(body, &mut StdRng::seed_from_u64(2)).unwrap();

        assert_eq!(questions.len(), 2);
        let second = &questions[1];
        assert_eq!(second.correct_answer(), "Amélie");
        assert_eq!(second.options().len(), 3);
        assert_eq!(
            second.options().iter().filter(|o| *o == "Amélie").count(),
            1
        );
        assert!(second.has_option("Léon"));
    }

    #[test]
    fn inconsistent_question_is_reported_with_its_index() {
        let body: TriviaResponse = serde_json::from_str(
            r#"{"results": [{"type": "multiple", "question": "Q", "correct_answer": "A", "incorrect_answers": []}]}"#,
        )
        .unwrap();
        assert!(matches!(
            map_batch(body, &mut StdRng::seed_from_u64(1)),
            Err(FetchError::InvalidQuestion { index: 0, .. })
        ));
    }
}
