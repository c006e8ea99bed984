mod ids;
mod question;
mod settings;
mod summary;

pub use ids::QuestionId;
pub use question::{Choice, Difficulty, Question, QuestionError};
pub use settings::{QuizSettings, SettingsError};
pub use summary::{QuizSummary, SummaryError};
