use chrono::{DateTime, Utc};
use std::fmt;
use tracing::{debug, info};

use quiz_core::model::{Choice, Difficulty, Question, QuestionId, QuizSettings, QuizSummary};
use quiz_core::{Clock, DifficultyPredictor};

use super::progress::QuizProgress;
use super::view::{QuestionView, QuizSnapshot};
use crate::error::SessionError;
use crate::selection::{RandomSource, select_next};

//
// ─── PHASES & OUTCOMES ─────────────────────────────────────────────────────────
//

/// Where the session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// A question is displayed and no answer has been submitted.
    AwaitingSelection,
    /// An answer was submitted and feedback is showing.
    Answered,
    /// All configured questions were asked, or the pool ran dry.
    Completed,
}

/// Feedback for a submitted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub question_id: QuestionId,
    pub selected: Choice,
    pub correct_choice: Choice,
    pub correct: bool,
    pub correct_text: String,
}

/// Result of a `submit` call that did not violate the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing (or nothing valid) was selected; the caller should prompt again.
    SelectionRequired,
    Answered(AnswerFeedback),
}

#[derive(Debug, Clone)]
struct CurrentQuestion {
    question: Question,
    number: u32,
    requested: Difficulty,
    fallback: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Adaptive quiz session.
///
/// Owns the remaining pool and the running score. Every question is moved
/// out of the pool when presented, so nothing repeats within a session.
pub struct QuizSession {
    settings: QuizSettings,
    predictor: DifficultyPredictor,
    clock: Clock,
    rng: Box<dyn RandomSource>,
    pool: Vec<Question>,
    current: Option<CurrentQuestion>,
    phase: QuizPhase,
    score: u32,
    asked: u32,
    last_answer: Option<AnswerFeedback>,
    started_at: DateTime<Utc>,
    summary: Option<QuizSummary>,
}

impl QuizSession {
    /// Start a session over `questions` and present the first one.
    ///
    /// An empty question list completes immediately with a score of `0 / total`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Summary` if the completion summary cannot be built.
    pub fn start(
        questions: Vec<Question>,
        settings: QuizSettings,
        rng: Box<dyn RandomSource>,
        clock: Clock,
    ) -> Result<Self, SessionError> {
        Self::start_with_predictor(questions, settings, DifficultyPredictor::default(), rng, clock)
    }

    /// Like [`QuizSession::start`] with custom accuracy thresholds.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Summary` if the completion summary cannot be built.
    pub fn start_with_predictor(
        questions: Vec<Question>,
        settings: QuizSettings,
        predictor: DifficultyPredictor,
        rng: Box<dyn RandomSource>,
        clock: Clock,
    ) -> Result<Self, SessionError> {
        let mut session = Self {
            settings,
            predictor,
            clock,
            rng,
            pool: Vec::new(),
            current: None,
            phase: QuizPhase::AwaitingSelection,
            score: 0,
            asked: 0,
            last_answer: None,
            started_at: clock.now(),
            summary: None,
        };
        session.restart(questions)?;
        Ok(session)
    }

    /// Reset score and progress, replace the pool, and present a new first question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Summary` if the completion summary cannot be built.
    pub fn restart(&mut self, questions: Vec<Question>) -> Result<(), SessionError> {
        info!(pool = questions.len(), total = self.total(), "starting quiz");
        self.pool = questions;
        self.current = None;
        self.score = 0;
        self.asked = 0;
        self.last_answer = None;
        self.summary = None;
        self.started_at = self.clock.now();
        self.select_next_question()
    }

    /// Submit the selected option for the current question.
    ///
    /// `None` means nothing was selected: the session is left untouched and
    /// `SubmitOutcome::SelectionRequired` is returned.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after the quiz has finished, or
    /// `SessionError::NotAwaitingSelection` if the current question was already answered.
    pub fn submit(&mut self, selection: Option<Choice>) -> Result<SubmitOutcome, SessionError> {
        match self.phase {
            QuizPhase::Completed => return Err(SessionError::Completed),
            QuizPhase::Answered => return Err(SessionError::NotAwaitingSelection),
            QuizPhase::AwaitingSelection => {}
        }

        let Some(choice) = selection else {
            return Ok(SubmitOutcome::SelectionRequired);
        };
        let Some(current) = self.current.as_ref() else {
            return Err(SessionError::Completed);
        };

        let question = &current.question;
        let correct = question.is_correct(choice);
        let feedback = AnswerFeedback {
            question_id: question.id(),
            selected: choice,
            correct_choice: question.answer(),
            correct,
            correct_text: question.answer_text().to_owned(),
        };

        if correct {
            self.score += 1;
        }
        self.asked += 1;
        self.phase = QuizPhase::Answered;
        self.last_answer = Some(feedback.clone());
        debug!(
            id = %feedback.question_id,
            correct,
            score = self.score,
            asked = self.asked,
            "answer submitted"
        );

        Ok(SubmitOutcome::Answered(feedback))
    }

    /// Submit a raw option number where `0` (or anything outside 1-4) means
    /// no valid selection.
    ///
    /// # Errors
    ///
    /// Same as [`QuizSession::submit`].
    pub fn submit_raw(&mut self, value: u8) -> Result<SubmitOutcome, SessionError> {
        self.submit(Choice::new(value).ok())
    }

    /// Move past the feedback to the next question, or complete the quiz.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after the quiz has finished, or
    /// `SessionError::NotAnswered` if the current question has no answer yet.
    pub fn advance(&mut self) -> Result<QuizPhase, SessionError> {
        match self.phase {
            QuizPhase::Completed => Err(SessionError::Completed),
            QuizPhase::AwaitingSelection => Err(SessionError::NotAnswered),
            QuizPhase::Answered => {
                self.select_next_question()?;
                Ok(self.phase)
            }
        }
    }

    fn select_next_question(&mut self) -> Result<(), SessionError> {
        self.current = None;

        if self.asked >= self.total() {
            return self.complete();
        }

        let difficulty = self.predictor.predict(self.score, self.asked);
        let Some(selection) = select_next(&mut self.pool, difficulty, self.rng.as_mut()) else {
            info!(asked = self.asked, total = self.total(), "question pool exhausted");
            return self.complete();
        };

        self.current = Some(CurrentQuestion {
            question: selection.question,
            number: self.asked + 1,
            requested: selection.requested,
            fallback: selection.fallback,
        });
        self.phase = QuizPhase::AwaitingSelection;
        Ok(())
    }

    fn complete(&mut self) -> Result<(), SessionError> {
        let completed_at = self.clock.now().max(self.started_at);
        let summary = QuizSummary::new(
            self.started_at,
            completed_at,
            self.score,
            self.asked,
            self.total(),
        )?;
        info!(score = self.score, total = self.total(), "quiz completed");
        self.summary = Some(summary);
        self.phase = QuizPhase::Completed;
        Ok(())
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == QuizPhase::Completed
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn asked(&self) -> u32 {
        self.asked
    }

    /// Configured session length.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.settings.total_questions()
    }

    /// Questions not yet presented in this session.
    #[must_use]
    pub fn remaining_pool(&self) -> &[Question] {
        &self.pool
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current.as_ref().map(|c| &c.question)
    }

    /// Feedback for the most recent answer, while it is still on screen.
    #[must_use]
    pub fn last_feedback(&self) -> Option<&AnswerFeedback> {
        match self.phase {
            QuizPhase::Answered => self.last_answer.as_ref(),
            QuizPhase::AwaitingSelection | QuizPhase::Completed => None,
        }
    }

    #[must_use]
    pub fn summary(&self) -> Option<&QuizSummary> {
        self.summary.as_ref()
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            total: self.total(),
            asked: self.asked,
            remaining: self.pool.len(),
            is_complete: self.is_complete(),
        }
    }

    /// Read-only view of the session for rendering.
    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        QuizSnapshot {
            phase: self.phase,
            score: self.score,
            asked: self.asked,
            total: self.total(),
            question: self.current.as_ref().map(|c| QuestionView {
                id: c.question.id(),
                number: c.number,
                prompt: c.question.prompt().to_owned(),
                options: c.question.options().clone(),
                difficulty: c.question.difficulty(),
                requested: c.requested,
                fallback: c.fallback,
            }),
            feedback: self.last_feedback().cloned(),
            progress: self.progress(),
            summary: self.summary.clone(),
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("phase", &self.phase)
            .field("score", &self.score)
            .field("asked", &self.asked)
            .field("total", &self.total())
            .field("pool_len", &self.pool.len())
            .field("current", &self.current.as_ref().map(|c| c.question.id()))
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
