#![forbid(unsafe_code)]

pub mod error;
pub mod selection;
pub mod sessions;

pub use quiz_core::Clock;

pub use error::SessionError;
pub use selection::{RandomSource, ScriptedRandom, Selection, ThreadRandom, select_next};
pub use sessions::{
    AnswerFeedback, QuestionView, QuizLoopService, QuizPhase, QuizProgress, QuizSession,
    QuizSnapshot, SubmitOutcome,
};
