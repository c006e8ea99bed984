use quiz_core::model::Choice;
use services::{
    QuestionView, QuizLoopService, QuizPhase, QuizSession, QuizSnapshot, SessionError,
    SubmitOutcome,
};

use crate::views::ViewError;
use crate::vm::time_fmt::format_elapsed;

pub const SELECT_PROMPT: &str = "Please select an answer before submitting.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Select(Choice),
    Submit,
    Next,
    Restart,
}

/// Per-option render state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub choice: Choice,
    pub text: String,
    pub selected: bool,
    /// Highlight after answering: `Some(true)` for the correct option,
    /// `Some(false)` for a wrong pick, `None` otherwise.
    pub verdict: Option<bool>,
    pub disabled: bool,
}

/// Flattened, pre-formatted state for the quiz screen.
#[derive(Clone, Debug, PartialEq)]
pub struct QuizScreenVm {
    pub phase: QuizPhase,
    pub heading: Option<String>,
    pub difficulty_label: Option<String>,
    pub options: Vec<OptionVm>,
    pub feedback: Option<(bool, String)>,
    pub warning: Option<&'static str>,
    pub progress_label: String,
    /// Share of the session answered, `0.0..=1.0`.
    pub progress: f64,
    pub final_score: Option<String>,
    pub elapsed: Option<String>,
}

/// Holds the running session plus UI-only state (pending radio selection, warning).
pub struct QuizVm {
    session: QuizSession,
    selected: Option<Choice>,
    warning: Option<&'static str>,
}

impl QuizVm {
    #[must_use]
    pub fn new(session: QuizSession) -> Self {
        Self {
            session,
            selected: None,
            warning: None,
        }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn selected(&self) -> Option<Choice> {
        self.selected
    }

    #[must_use]
    pub fn warning(&self) -> Option<&'static str> {
        self.warning
    }

    /// Apply a user intent to the session.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::InvalidAction` when the intent does not fit the
    /// current phase, `ViewError::Unknown` for other session failures.
    pub fn dispatch(
        &mut self,
        intent: QuizIntent,
        quiz_loop: &QuizLoopService,
    ) -> Result<(), ViewError> {
        match intent {
            QuizIntent::Select(choice) => {
                if self.session.phase() != QuizPhase::AwaitingSelection {
                    return Err(ViewError::InvalidAction);
                }
                self.selected = Some(choice);
                self.warning = None;
            }
            QuizIntent::Submit => match self.session.submit(self.selected).map_err(map_error)? {
                SubmitOutcome::SelectionRequired => self.warning = Some(SELECT_PROMPT),
                SubmitOutcome::Answered(_) => self.warning = None,
            },
            QuizIntent::Next => {
                self.session.advance().map_err(map_error)?;
                self.selected = None;
            }
            QuizIntent::Restart => {
                quiz_loop.restart(&mut self.session).map_err(map_error)?;
                self.selected = None;
                self.warning = None;
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn screen(&self) -> QuizScreenVm {
        map_quiz_screen(&self.session.snapshot(), self.selected, self.warning)
    }
}

fn map_error(err: SessionError) -> ViewError {
    match err {
        SessionError::Completed | SessionError::NotAwaitingSelection | SessionError::NotAnswered => {
            ViewError::InvalidAction
        }
        _ => ViewError::Unknown,
    }
}

#[must_use]
pub fn question_heading(question: &QuestionView) -> String {
    format!("Q{}: {}", question.number, question.prompt)
}

/// Difficulty line under the heading. After a fallback the predicted level
/// is shown too, since the question on screen is from another bucket.
#[must_use]
pub fn difficulty_label(question: &QuestionView) -> String {
    if question.fallback {
        format!(
            "Difficulty: {} (predicted {})",
            question.difficulty, question.requested
        )
    } else {
        format!("Difficulty: {}", question.difficulty)
    }
}

#[must_use]
pub fn feedback_text(correct: bool, correct_text: &str) -> String {
    if correct {
        "Correct!".to_string()
    } else {
        format!("Wrong! Correct answer: {correct_text}")
    }
}

#[must_use]
pub fn map_quiz_screen(
    snapshot: &QuizSnapshot,
    selected: Option<Choice>,
    warning: Option<&'static str>,
) -> QuizScreenVm {
    let answered = snapshot.phase == QuizPhase::Answered;

    let options = snapshot
        .question
        .as_ref()
        .map(|question| {
            Choice::ALL
                .iter()
                .zip(question.options.iter())
                .map(|(&choice, text)| {
                    let verdict = snapshot.feedback.as_ref().and_then(|fb| {
                        if fb.correct_choice == choice {
                            Some(true)
                        } else if fb.selected == choice {
                            Some(false)
                        } else {
                            None
                        }
                    });
                    OptionVm {
                        choice,
                        text: text.clone(),
                        selected: selected == Some(choice),
                        verdict,
                        disabled: answered,
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    let final_score = snapshot
        .summary
        .as_ref()
        .map(|summary| format!("Quiz Completed! Your score: {}", summary.score_label()));

    QuizScreenVm {
        phase: snapshot.phase,
        heading: snapshot.question.as_ref().map(question_heading),
        difficulty_label: snapshot.question.as_ref().map(difficulty_label),
        options,
        feedback: snapshot
            .feedback
            .as_ref()
            .map(|fb| (fb.correct, feedback_text(fb.correct, &fb.correct_text))),
        warning,
        progress_label: format!("{} / {}", snapshot.progress.asked, snapshot.progress.total),
        progress: snapshot.progress.fraction(),
        final_score,
        elapsed: snapshot
            .summary
            .as_ref()
            .map(|summary| format_elapsed(summary.duration())),
    }
}
