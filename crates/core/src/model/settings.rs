use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("total questions per session must be > 0")]
    InvalidTotalQuestions,
}

/// Configuration for a single quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    total_questions: u32,
}

impl QuizSettings {
    pub const DEFAULT_TOTAL_QUESTIONS: u32 = 5;

    /// Creates settings with a custom session length.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidTotalQuestions` if `total_questions` is zero.
    pub fn new(total_questions: u32) -> Result<Self, SettingsError> {
        if total_questions == 0 {
            return Err(SettingsError::InvalidTotalQuestions);
        }
        Ok(Self { total_questions })
    }

    /// Number of questions asked before the session completes.
    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            total_questions: Self::DEFAULT_TOTAL_QUESTIONS,
        }
    }
}
