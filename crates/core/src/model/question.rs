use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("option {choice} cannot be empty")]
    EmptyOption { choice: u8 },

    #[error("choice must be between 1 and 4, got {0}")]
    ChoiceOutOfRange(u8),

    #[error("unknown difficulty label: {0:?}")]
    UnknownDifficulty(String),
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Difficulty label attached to every question and predicted per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = QuestionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(QuestionError::UnknownDifficulty(s.to_string())),
        }
    }
}

//
// ─── CHOICE ────────────────────────────────────────────────────────────────────
//

/// One of the four answer slots, numbered 1 through 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Choice(u8);

impl Choice {
    pub const ALL: [Choice; 4] = [Choice(1), Choice(2), Choice(3), Choice(4)];

    /// Validates a 1-based option number.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::ChoiceOutOfRange` unless `value` is in `1..=4`.
    pub fn new(value: u8) -> Result<Self, QuestionError> {
        if (1..=4).contains(&value) {
            Ok(Self(value))
        } else {
            Err(QuestionError::ChoiceOutOfRange(value))
        }
    }

    /// The 1-based option number.
    #[must_use]
    pub fn number(self) -> u8 {
        self.0
    }

    /// The 0-based position in the option list.
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A validated multiple-choice question.
///
/// Built once at load time and never mutated afterwards; sessions move
/// questions out of their pool instead of editing them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: [String; 4],
    answer: Choice,
    difficulty: Difficulty,
}

impl Question {
    /// Creates a question after trimming and validating its texts.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyPrompt` or `QuestionError::EmptyOption`
    /// when any text is blank.
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        options: [String; 4],
        answer: Choice,
        difficulty: Difficulty,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into().trim().to_owned();
        if prompt.is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        let mut cleaned: [String; 4] = Default::default();
        for (slot, (choice, text)) in cleaned.iter_mut().zip(Choice::ALL.iter().zip(options)) {
            let text = text.trim().to_owned();
            if text.is_empty() {
                return Err(QuestionError::EmptyOption {
                    choice: choice.number(),
                });
            }
            *slot = text;
        }

        Ok(Self {
            id,
            prompt,
            options: cleaned,
            answer,
            difficulty,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String; 4] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, choice: Choice) -> &str {
        &self.options[choice.index()]
    }

    #[must_use]
    pub fn answer(&self) -> Choice {
        self.answer
    }

    /// Text of the correct option, shown as feedback after a wrong answer.
    #[must_use]
    pub fn answer_text(&self) -> &str {
        self.option(self.answer)
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn is_correct(&self, choice: Choice) -> bool {
        self.answer == choice
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> [String; 4] {
        ["Paris".into(), " London ".into(), "Rome".into(), "Berlin".into()]
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("Easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!(" HARD ".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        let err = "extreme".parse::<Difficulty>().unwrap_err();
        assert!(matches!(err, QuestionError::UnknownDifficulty(_)));
    }

    #[test]
    fn choice_rejects_out_of_range() {
        assert_eq!(Choice::new(1).unwrap().index(), 0);
        assert_eq!(Choice::new(4).unwrap().index(), 3);
        assert_eq!(Choice::new(0).unwrap_err(), QuestionError::ChoiceOutOfRange(0));
        assert_eq!(Choice::new(5).unwrap_err(), QuestionError::ChoiceOutOfRange(5));
    }

    #[test]
    fn question_trims_and_exposes_answer_text() {
        let q = Question::new(
            QuestionId::new(1),
            "  Capital of France? ",
            options(),
            Choice::new(1).unwrap(),
            Difficulty::Easy,
        )
        .unwrap();

        assert_eq!(q.prompt(), "Capital of France?");
        assert_eq!(q.option(Choice::new(2).unwrap()), "London");
        assert_eq!(q.answer_text(), "Paris");
        assert!(q.is_correct(Choice::new(1).unwrap()));
        assert!(!q.is_correct(Choice::new(3).unwrap()));
    }

    #[test]
    fn question_rejects_blank_texts() {
        let err = Question::new(
            QuestionId::new(1),
            "   ",
            options(),
            Choice::new(1).unwrap(),
            Difficulty::Easy,
        )
        .unwrap_err();
        assert_eq!(err, QuestionError::EmptyPrompt);

        let mut opts = options();
        opts[2] = String::new();
        let err = Question::new(
            QuestionId::new(1),
            "Q",
            opts,
            Choice::new(1).unwrap(),
            Difficulty::Easy,
        )
        .unwrap_err();
        assert_eq!(err, QuestionError::EmptyOption { choice: 3 });
    }
}
