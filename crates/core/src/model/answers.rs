use std::collections::BTreeMap;

use crate::model::QuestionId;

/// Selected option text per question. Entries are never overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerMap(BTreeMap<QuestionId, String>);

impl AnswerMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer if the question has none yet.
    ///
    /// Returns `false` when an answer was already present.
    pub fn record(&mut self, id: QuestionId, answer: impl Into<String>) -> bool {
        if self.0.contains_key(&id) {
            return false;
        }
        self.0.insert(id, answer.into());
        true
    }

    #[must_use]
    pub fn get(&self, id: QuestionId) -> Option<&str> {
        self.0.get(&id).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, id: QuestionId) -> bool {
        self.0.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, &str)> {
        self.0.iter().map(|(id, answer)| (*id, answer.as_str()))
    }
}

impl FromIterator<(QuestionId, String)> for AnswerMap {
    fn from_iter<I: IntoIterator<Item = (QuestionId, String)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (id, answer) in iter {
            map.record(id, answer);
        }
        map
    }
}
