//! Tunable thresholds for the similarity quality filter.

/// Default minimum support: a pair needs strictly more co-raters than this
pub const DEFAULT_MIN_SUPPORT: u32 = 10;

/// Default minimum score: a pair needs a cosine score strictly above this
pub const DEFAULT_MIN_SCORE: f64 = 0.95;

/// Quality filter applied to every scored pair.
///
/// Both comparisons are strict: a pair qualifies only if
/// `support > min_support` and `score > min_score`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityThresholds {
    pub min_support: u32,
    pub min_score: f64,
}

impl SimilarityThresholds {
    /// Configure the support threshold (default: 10)
    pub fn with_min_support(mut self, min_support: u32) -> Self {
        self.min_support = min_support;
        self
    }

    /// Configure the score threshold (default: 0.95)
    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn accepts(&self, score: f64, support: u32) -> bool {
        support > self.min_support && score > self.min_score
    }
}

impl Default for SimilarityThresholds {
    fn default() -> Self {
        Self {
            min_support: DEFAULT_MIN_SUPPORT,
            min_score: DEFAULT_MIN_SCORE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_are_strict() {
        let thresholds = SimilarityThresholds::default();
        assert!(!thresholds.accepts(0.99, 10));
        assert!(!thresholds.accepts(0.95, 50));
        assert!(thresholds.accepts(0.96, 11));
    }

    #[test]
    fn test_builder() {
        let thresholds = SimilarityThresholds::default()
            .with_min_support(2)
            .with_min_score(0.5);
        assert!(thresholds.accepts(0.6, 3));
        assert!(!thresholds.accepts(0.6, 2));
    }
}
