#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod predictor;
pub mod time;

pub use error::Error;
pub use predictor::{DifficultyPredictor, predict};
pub use time::Clock;
