#![forbid(unsafe_code)]

pub mod dataset;
pub mod repository;

pub use dataset::{CsvQuestionSource, QuestionRow};
pub use repository::{InMemoryQuestionSource, QuestionSource, QuestionStore, StorageError};
