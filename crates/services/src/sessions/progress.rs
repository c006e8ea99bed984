/// Aggregated view of quiz progress, useful for a progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    pub total: u32,
    pub asked: u32,
    pub remaining: usize,
    pub is_complete: bool,
}

impl QuizProgress {
    /// Fraction of the configured session already answered, in `0.0..=1.0`.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (f64::from(self.asked) / f64::from(self.total)).min(1.0)
    }
}
