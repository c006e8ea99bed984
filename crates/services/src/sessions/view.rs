use quiz_core::model::{Difficulty, QuestionId, QuizSummary};

use super::progress::QuizProgress;
use super::service::{AnswerFeedback, QuizPhase};

/// Presentation-agnostic copy of the question on screen.
///
/// No pre-formatted strings; the UI decides how to label things.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub id: QuestionId,
    /// 1-based position within the session.
    pub number: u32,
    pub prompt: String,
    pub options: [String; 4],
    pub difficulty: Difficulty,
    /// Difficulty the predictor asked for; differs from `difficulty` after a fallback.
    pub requested: Difficulty,
    pub fallback: bool,
}

/// Read-only snapshot of a `QuizSession` for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSnapshot {
    pub phase: QuizPhase,
    pub score: u32,
    pub asked: u32,
    pub total: u32,
    pub question: Option<QuestionView>,
    pub feedback: Option<AnswerFeedback>,
    pub progress: QuizProgress,
    pub summary: Option<QuizSummary>,
}
