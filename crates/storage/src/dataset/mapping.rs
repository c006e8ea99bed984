use quiz_core::model::{Choice, Difficulty, Question, QuestionError, QuestionId};
use serde::Deserialize;
use thiserror::Error;

/// Column names every question file must provide.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "question",
    "option1",
    "option2",
    "option3",
    "option4",
    "answer",
    "difficulty",
];

/// Why a single row was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("answer must be an integer between 1 and 4, got {0:?}")]
    InvalidAnswer(String),

    #[error(transparent)]
    Question(#[from] QuestionError),
}

/// Raw shape of one CSV row, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionRow {
    pub question: String,
    pub option1: String,
    pub option2: String,
    pub option3: String,
    pub option4: String,
    pub answer: String,
    pub difficulty: String,
}

impl QuestionRow {
    /// Validate the row and convert it into a domain `Question`.
    ///
    /// # Errors
    ///
    /// Returns `RowError` when the answer is not 1-4, the difficulty label is
    /// unknown, or any text is blank.
    pub fn into_question(self, id: QuestionId) -> Result<Question, RowError> {
        let answer = parse_answer(&self.answer)?;
        let difficulty: Difficulty = self.difficulty.parse()?;
        let question = Question::new(
            id,
            self.question,
            [self.option1, self.option2, self.option3, self.option4],
            answer,
            difficulty,
        )?;
        Ok(question)
    }
}

fn parse_answer(raw: &str) -> Result<Choice, RowError> {
    let invalid = || RowError::InvalidAnswer(raw.to_string());
    let value: u8 = raw.trim().parse().map_err(|_| invalid())?;
    Choice::new(value).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(answer: &str, difficulty: &str) -> QuestionRow {
        QuestionRow {
            question: "2 + 2?".into(),
            option1: "3".into(),
            option2: "4".into(),
            option3: "5".into(),
            option4: "22".into(),
            answer: answer.into(),
            difficulty: difficulty.into(),
        }
    }

    #[test]
    fn valid_row_maps_to_question() {
        let q = row("2", "Medium").into_question(QuestionId::new(9)).unwrap();
        assert_eq!(q.id(), QuestionId::new(9));
        assert_eq!(q.answer_text(), "4");
        assert_eq!(q.difficulty(), Difficulty::Medium);
    }

    #[test]
    fn answer_outside_range_is_rejected() {
        for bad in ["0", "5", "two", "", "-1"] {
            let err = row(bad, "easy").into_question(QuestionId::new(1)).unwrap_err();
            assert_eq!(err, RowError::InvalidAnswer(bad.to_string()));
        }
    }

    #[test]
    fn unknown_difficulty_is_rejected() {
        let err = row("1", "expert").into_question(QuestionId::new(1)).unwrap_err();
        assert!(matches!(
            err,
            RowError::Question(QuestionError::UnknownDifficulty(_))
        ));
    }
}
