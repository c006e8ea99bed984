use thiserror::Error;

use crate::model::{QuestionError, SettingsError, SummaryError};
use crate::predictor::PredictorError;

/// Any validation failure raised by the domain layer.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Summary(#[from] SummaryError),
    #[error(transparent)]
    Predictor(#[from] PredictorError),
}
