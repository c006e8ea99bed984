use thiserror::Error;

use crate::model::Difficulty;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PredictorError {
    #[error("thresholds must satisfy 0 <= medium ({medium_above}) <= hard ({hard_above}) <= 1")]
    InvalidThresholds { hard_above: f64, medium_above: f64 },
}

//
// ─── PREDICTOR ─────────────────────────────────────────────────────────────────
//

/// Maps running accuracy to the difficulty of the next question.
///
/// Accuracy strictly above `hard_above` yields `Hard`, strictly above
/// `medium_above` yields `Medium`, anything else `Easy`. With no attempts
/// yet there is no signal and the predictor always answers `Easy`.
///
/// # Examples
///
/// ```
/// # use quiz_core::predictor::DifficultyPredictor;
/// # use quiz_core::model::Difficulty;
/// let predictor = DifficultyPredictor::default();
/// assert_eq!(predictor.predict(0, 0), Difficulty::Easy);
/// assert_eq!(predictor.predict(5, 5), Difficulty::Hard);
/// assert_eq!(predictor.predict(4, 5), Difficulty::Medium);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyPredictor {
    hard_above: f64,
    medium_above: f64,
}

impl DifficultyPredictor {
    pub const DEFAULT_HARD_ABOVE: f64 = 0.8;
    pub const DEFAULT_MEDIUM_ABOVE: f64 = 0.5;

    /// Creates a predictor with custom accuracy thresholds.
    ///
    /// # Errors
    ///
    /// Returns `PredictorError::InvalidThresholds` unless
    /// `0 <= medium_above <= hard_above <= 1`.
    pub fn new(hard_above: f64, medium_above: f64) -> Result<Self, PredictorError> {
        let in_unit = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
        if !in_unit(hard_above) || !in_unit(medium_above) || medium_above > hard_above {
            return Err(PredictorError::InvalidThresholds {
                hard_above,
                medium_above,
            });
        }
        Ok(Self {
            hard_above,
            medium_above,
        })
    }

    #[must_use]
    pub fn hard_above(&self) -> f64 {
        self.hard_above
    }

    #[must_use]
    pub fn medium_above(&self) -> f64 {
        self.medium_above
    }

    /// Predicts the next difficulty from `score` correct answers out of `attempts`.
    #[must_use]
    pub fn predict(&self, score: u32, attempts: u32) -> Difficulty {
        if attempts == 0 {
            return Difficulty::Easy;
        }
        if exceeds(score, attempts, self.hard_above) {
            Difficulty::Hard
        } else if exceeds(score, attempts, self.medium_above) {
            Difficulty::Medium
        } else {
            Difficulty::Easy
        }
    }
}

impl Default for DifficultyPredictor {
    fn default() -> Self {
        Self {
            hard_above: Self::DEFAULT_HARD_ABOVE,
            medium_above: Self::DEFAULT_MEDIUM_ABOVE,
        }
    }
}

/// Predicts with the default 0.8 / 0.5 thresholds.
#[must_use]
pub fn predict(score: u32, attempts: u32) -> Difficulty {
    DifficultyPredictor::default().predict(score, attempts)
}

// `score / attempts > threshold`, kept exact at the default boundaries
// (4/5 must not round above 0.8).
fn exceeds(score: u32, attempts: u32, threshold: f64) -> bool {
    if let Some((num, den)) = as_ratio(threshold) {
        return u64::from(score) * den > u64::from(attempts) * num;
    }
    f64::from(score) / f64::from(attempts) > threshold
}

fn as_ratio(threshold: f64) -> Option<(u64, u64)> {
    const DENOMINATORS: [u64; 4] = [2, 4, 5, 10];
    DENOMINATORS.iter().find_map(|&den| {
        #[allow(clippy::cast_precision_loss)]
        let scaled = threshold * den as f64;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let num = scaled.round() as u64;
        #[allow(clippy::cast_precision_loss)]
        let exact = (scaled - num as f64).abs() < 1e-9;
        exact.then_some((num, den))
    })
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
