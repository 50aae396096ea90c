//! Counters collected over one job run.
//!
//! Records dropped by the job (malformed lines, pairs whose movies are
//! missing from the catalog) are counted here instead of vanishing, so a
//! run can be checked for data problems after the fact.

use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JobReport {
    /// Input lines seen by step 1, including blank and malformed ones
    pub lines_read: usize,
    pub blank_lines: usize,
    /// Lines dropped by the rating parser
    pub malformed_records: usize,
    /// Distinct users (step 1 groups)
    pub users: usize,
    /// Combinations of a movie with itself from repeated ratings
    pub self_pairs_skipped: usize,
    /// Directed samples emitted by the pair generator
    pub directed_samples: usize,
    /// Distinct directed movie pairs (step 2 groups)
    pub movie_pairs: usize,
    /// Pairs passing the quality filter
    pub pairs_kept: usize,
    pub pairs_filtered: usize,
    /// Kept pairs dropped because a movie id is not in the catalog
    pub lookup_misses: usize,
    /// Final output records
    pub source_movies: usize,
}

impl JobReport {
    /// True when the run dropped input or intermediate records
    pub fn has_drops(&self) -> bool {
        self.malformed_records > 0 || self.lookup_misses > 0
    }

    /// Emit the report through tracing
    pub fn log(&self) {
        info!(
            lines = self.lines_read,
            users = self.users,
            samples = self.directed_samples,
            pairs = self.movie_pairs,
            kept = self.pairs_kept,
            movies = self.source_movies,
            "Similarity job finished"
        );
        if self.has_drops() {
            warn!(
                malformed = self.malformed_records,
                lookup_misses = self.lookup_misses,
                "Records were dropped during the run"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_drops() {
        let mut report = JobReport::default();
        assert!(!report.has_drops());

        report.lookup_misses = 1;
        assert!(report.has_drops());

        report.lookup_misses = 0;
        report.malformed_records = 3;
        assert!(report.has_drops());
    }
}
