use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("score ({score}) exceeds questions asked ({asked})")]
    ScoreExceedsAsked { score: u32, asked: u32 },
}

/// Final result of a completed quiz session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSummary {
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    score: u32,
    asked: u32,
    total: u32,
}

impl QuizSummary {
    /// Build a summary for a finished session.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::InvalidTimeRange` if `completed_at` is before `started_at`.
    /// Returns `SummaryError::ScoreExceedsAsked` if `score > asked`.
    pub fn new(
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        score: u32,
        asked: u32,
        total: u32,
    ) -> Result<Self, SummaryError> {
        if completed_at < started_at {
            return Err(SummaryError::InvalidTimeRange);
        }
        if score > asked {
            return Err(SummaryError::ScoreExceedsAsked { score, asked });
        }

        Ok(Self {
            started_at,
            completed_at,
            score,
            asked,
            total,
        })
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.completed_at - self.started_at
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn asked(&self) -> u32 {
        self.asked
    }

    /// Configured session length, which may exceed `asked` when the pool ran dry.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn score_label(&self) -> String {
        format!("{} / {}", self.score, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn summary_reports_score_and_duration() {
        let start = fixed_now();
        let end = start + Duration::seconds(90);
        let summary = QuizSummary::new(start, end, 3, 4, 5).unwrap();

        assert_eq!(summary.score_label(), "3 / 5");
        assert_eq!(summary.asked(), 4);
        assert_eq!(summary.duration(), Duration::seconds(90));
    }

    #[test]
    fn empty_summary_keeps_configured_total() {
        let now = fixed_now();
        let summary = QuizSummary::new(now, now, 0, 0, 5).unwrap();
        assert_eq!(summary.asked(), 0);
        assert_eq!(summary.score_label(), "0 / 5");
    }

    #[test]
    fn rejects_inconsistent_inputs() {
        let now = fixed_now();
        let err = QuizSummary::new(now, now - Duration::seconds(1), 0, 0, 5).unwrap_err();
        assert_eq!(err, SummaryError::InvalidTimeRange);

        let err = QuizSummary::new(now, now, 3, 2, 5).unwrap_err();
        assert_eq!(err, SummaryError::ScoreExceedsAsked { score: 3, asked: 2 });
    }
}
