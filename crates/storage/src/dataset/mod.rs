use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use quiz_core::model::{Question, QuestionId};
use tracing::{debug, warn};

use crate::repository::{QuestionSource, StorageError};

mod mapping;

pub use mapping::{QuestionRow, REQUIRED_COLUMNS, RowError};

/// Default location of the bundled question file, relative to the working directory.
pub const DEFAULT_QUESTIONS_PATH: &str = "data/questions.csv";

/// Question source backed by a CSV file with a header row.
///
/// Each data row becomes one question whose id is the row's 1-based
/// position. Rows that fail validation are logged and skipped.
#[derive(Debug, Clone)]
pub struct CsvQuestionSource {
    path: PathBuf,
}

impl CsvQuestionSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse questions from any reader containing CSV text.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::MissingColumn` if the header lacks a required
    /// column, or `StorageError::Csv`/`StorageError::Io` if the input cannot be read.
    pub fn read_from<R: io::Read>(reader: R) -> Result<Vec<Question>, StorageError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers().map_err(csv_error)?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h.eq_ignore_ascii_case(column)) {
                return Err(StorageError::MissingColumn(column));
            }
        }
        let headers = csv::StringRecord::from(
            headers
                .iter()
                .map(str::to_ascii_lowercase)
                .collect::<Vec<_>>(),
        );

        let mut questions = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let row_number = index + 1;
            let record = match result {
                Ok(record) => record,
                Err(err) if matches!(err.kind(), csv::ErrorKind::Io(_)) => {
                    return Err(csv_error(err));
                }
                Err(err) => {
                    warn!(row = row_number, %err, "skipping unreadable row");
                    continue;
                }
            };

            let row: QuestionRow = match record.deserialize(Some(&headers)) {
                Ok(row) => row,
                Err(err) => {
                    warn!(row = row_number, %err, "skipping malformed row");
                    continue;
                }
            };

            let id = QuestionId::new(row_number as u64);
            match row.into_question(id) {
                Ok(question) => questions.push(question),
                Err(err) => warn!(row = row_number, %err, "skipping invalid question"),
            }
        }

        debug!(count = questions.len(), "parsed question rows");
        Ok(questions)
    }
}

impl QuestionSource for CsvQuestionSource {
    fn load_questions(&self) -> Result<Vec<Question>, StorageError> {
        let file = File::open(&self.path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => StorageError::NotFound(self.path.clone()),
            _ => StorageError::Io(format!("{}: {err}", self.path.display())),
        })?;
        Self::read_from(io::BufReader::new(file))
    }
}

fn csv_error(err: csv::Error) -> StorageError {
    if err.is_io_error() {
        StorageError::Io(err.to_string())
    } else {
        StorageError::Csv(err.to_string())
    }
}
