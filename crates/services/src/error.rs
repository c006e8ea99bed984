//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::SummaryError;

/// Errors emitted by quiz session transitions.
///
/// A missing selection is not an error; see `SubmitOutcome::SelectionRequired`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("quiz already completed")]
    Completed,
    #[error("an answer was already submitted for this question")]
    NotAwaitingSelection,
    #[error("no answer has been submitted for the current question")]
    NotAnswered,
    #[error(transparent)]
    Summary(#[from] SummaryError),
}
