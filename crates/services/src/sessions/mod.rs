mod progress;
mod service;
mod view;
mod workflow;

// Public API of the quiz session subsystem.
pub use crate::error::SessionError;
pub use progress::QuizProgress;
pub use service::{AnswerFeedback, QuizPhase, QuizSession, SubmitOutcome};
pub use view::{QuestionView, QuizSnapshot};
pub use workflow::QuizLoopService;
