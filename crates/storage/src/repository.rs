use std::path::PathBuf;
use std::sync::Arc;

use quiz_core::model::Question;
use thiserror::Error;
use tracing::{error, info};

/// Errors surfaced by question sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("question file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("io error: {0}")]
    Io(String),

    #[error("csv error: {0}")]
    Csv(String),

    #[error("missing column: {0}")]
    MissingColumn(&'static str),
}

/// Anything that can produce the full list of quiz questions.
pub trait QuestionSource: Send + Sync {
    /// Load every valid question from the source.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the source as a whole cannot be read.
    /// Individual malformed entries are skipped, not reported.
    fn load_questions(&self) -> Result<Vec<Question>, StorageError>;
}

/// Fixed question list for tests and prototyping.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQuestionSource {
    questions: Vec<Question>,
}

impl InMemoryQuestionSource {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }
}

impl QuestionSource for InMemoryQuestionSource {
    fn load_questions(&self) -> Result<Vec<Question>, StorageError> {
        Ok(self.questions.clone())
    }
}

/// Question Store: owns a source and applies the load-failure policy.
#[derive(Clone)]
pub struct QuestionStore {
    source: Arc<dyn QuestionSource>,
}

impl QuestionStore {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionSource>) -> Self {
        Self { source }
    }

    #[must_use]
    pub fn in_memory(questions: Vec<Question>) -> Self {
        Self::new(Arc::new(InMemoryQuestionSource::new(questions)))
    }

    /// Load questions, surfacing the failure to the caller.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the source cannot be read.
    pub fn load(&self) -> Result<Vec<Question>, StorageError> {
        self.source.load_questions()
    }

    /// Load questions, substituting an empty list when the source fails.
    #[must_use]
    pub fn load_or_empty(&self) -> Vec<Question> {
        match self.source.load_questions() {
            Ok(questions) => {
                info!(count = questions.len(), "loaded questions");
                questions
            }
            Err(err) => {
                error!(%err, "failed to load questions; continuing with none");
                Vec::new()
            }
        }
    }
}

impl std::fmt::Debug for QuestionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuestionStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Choice, Difficulty, QuestionId};

    struct FailingSource;

    impl QuestionSource for FailingSource {
        fn load_questions(&self) -> Result<Vec<Question>, StorageError> {
            Err(StorageError::Io("disk on fire".to_string()))
        }
    }

    fn build_question(id: u64) -> Question {
        Question::new(
            QuestionId::new(id),
            format!("Q{id}"),
            ["a".into(), "b".into(), "c".into(), "d".into()],
            Choice::new(1).unwrap(),
            Difficulty::Easy,
        )
        .unwrap()
    }

    #[test]
    fn in_memory_store_returns_every_question() {
        let store = QuestionStore::in_memory(vec![build_question(1), build_question(2)]);
        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(store.load_or_empty(), loaded);
    }

    #[test]
    fn failing_source_degrades_to_empty_list() {
        let store = QuestionStore::new(Arc::new(FailingSource));
        assert!(matches!(store.load(), Err(StorageError::Io(_))));
        assert!(store.load_or_empty().is_empty());
    }
}
