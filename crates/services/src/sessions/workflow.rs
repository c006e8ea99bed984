use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use quiz_core::model::QuizSettings;
use quiz_core::DifficultyPredictor;
use storage::QuestionStore;

use super::service::QuizSession;
use crate::Clock;
use crate::error::SessionError;
use crate::selection::{RandomSource, ThreadRandom};

/// Orchestrates loading the question pool and starting or restarting sessions.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    store: QuestionStore,
    settings: QuizSettings,
    predictor: DifficultyPredictor,
    seed: Option<Arc<AtomicU64>>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, store: QuestionStore, settings: QuizSettings) -> Self {
        Self {
            clock,
            store,
            settings,
            predictor: DifficultyPredictor::default(),
            seed: None,
        }
    }

    /// Make question picks reproducible. Each started session takes the next seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(Arc::new(AtomicU64::new(seed)));
        self
    }

    #[must_use]
    pub fn with_predictor(mut self, predictor: DifficultyPredictor) -> Self {
        self.predictor = predictor;
        self
    }

    /// Load the full question pool and start a new session.
    ///
    /// A dataset that fails to load is treated as empty, so the session
    /// completes immediately instead of failing.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Summary` if the completion summary cannot be built.
    pub fn start_session(&self) -> Result<QuizSession, SessionError> {
        let questions = self.store.load_or_empty();
        QuizSession::start_with_predictor(
            questions,
            self.settings,
            self.predictor,
            self.random_source(),
            self.clock,
        )
    }

    /// Reload the full question pool and reinitialize `session`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Summary` if the completion summary cannot be built.
    pub fn restart(&self, session: &mut QuizSession) -> Result<(), SessionError> {
        let questions = self.store.load_or_empty();
        session.restart(questions)
    }

    fn random_source(&self) -> Box<dyn RandomSource> {
        match &self.seed {
            Some(next) => Box::new(ThreadRandom::seeded(next.fetch_add(1, Ordering::Relaxed))),
            None => Box::new(ThreadRandom::new()),
        }
    }
}

impl std::fmt::Debug for QuizLoopService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizLoopService")
            .field("clock", &self.clock)
            .field("settings", &self.settings)
            .field("seeded", &self.seed.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Choice, Difficulty, Question, QuestionId};
    use quiz_core::time::fixed_clock;

    fn build_question(id: u64, difficulty: Difficulty) -> Question {
        Question::new(
            QuestionId::new(id),
            format!("Q{id}"),
            ["a".into(), "b".into(), "c".into(), "d".into()],
            Choice::new(1).unwrap(),
            difficulty,
        )
        .unwrap()
    }

    fn service(questions: Vec<Question>, total: u32) -> QuizLoopService {
        QuizLoopService::new(
            fixed_clock(),
            QuestionStore::in_memory(questions),
            QuizSettings::new(total).unwrap(),
        )
        .with_seed(42)
    }

    #[test]
    fn start_session_uses_configured_total() {
        let svc = service(
            (1..=6).map(|id| build_question(id, Difficulty::Easy)).collect(),
            4,
        );
        let session = svc.start_session().unwrap();

        assert_eq!(session.total(), 4);
        assert_eq!(session.remaining_pool().len(), 5);
    }

    #[test]
    fn restart_reloads_full_pool() {
        let svc = service(
            (1..=3).map(|id| build_question(id, Difficulty::Medium)).collect(),
            2,
        );
        let mut session = svc.start_session().unwrap();
        session.submit(Some(Choice::new(1).unwrap())).unwrap();
        session.advance().unwrap();
        assert_eq!(session.remaining_pool().len(), 1);

        svc.restart(&mut session).unwrap();

        assert_eq!(session.asked(), 0);
        assert_eq!(session.remaining_pool().len(), 2);
    }

    #[test]
    fn custom_predictor_drives_selection() {
        // Thresholds at 1.0 never leave Easy, even after a perfect answer.
        let svc = service(
            vec![
                build_question(1, Difficulty::Easy),
                build_question(2, Difficulty::Hard),
                build_question(3, Difficulty::Easy),
            ],
            2,
        )
        .with_predictor(DifficultyPredictor::new(1.0, 1.0).unwrap());
        let mut session = svc.start_session().unwrap();

        session.submit(Some(Choice::new(1).unwrap())).unwrap();
        session.advance().unwrap();

        let snapshot = session.snapshot();
        let question = snapshot.question.unwrap();
        assert_eq!(question.requested, Difficulty::Easy);
        assert_eq!(question.difficulty, Difficulty::Easy);
        assert!(!question.fallback);
    }
}
