//! Step 2 reducer: cosine similarity over all samples of one movie pair.
//!
//! The samples for a pair are treated as two parallel vectors, one per
//! movie:
//!
//! ```text
//! score = sum(a*b) / (sqrt(sum(a*a)) * sqrt(sum(b*b)))
//! ```
//!
//! A zero denominator (every rating for one of the movies is 0) yields a
//! score of 0, which then fails any positive score threshold.

use crate::config::SimilarityThresholds;
use crate::types::{MoviePairKey, RatingPairSample, SimilarityResult};

/// Compute `(score, sample_count)` for the samples of one pair.
///
/// The score is clamped to `[-1, 1]` to absorb floating point rounding.
pub fn cosine_similarity(samples: &[RatingPairSample]) -> (f64, u32) {
    let mut sum_ab = 0.0;
    let mut sum_aa = 0.0;
    let mut sum_bb = 0.0;

    for sample in samples {
        sum_ab += sample.rating_a * sample.rating_b;
        sum_aa += sample.rating_a * sample.rating_a;
        sum_bb += sample.rating_b * sample.rating_b;
    }

    let denominator = sum_aa.sqrt() * sum_bb.sqrt();
    let score = if denominator != 0.0 {
        (sum_ab / denominator).clamp(-1.0, 1.0)
    } else {
        0.0
    };

    (score, samples.len() as u32)
}

/// Scores movie pairs and keeps only those passing the thresholds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityScorer {
    thresholds: SimilarityThresholds,
}

impl SimilarityScorer {
    pub fn new(thresholds: SimilarityThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> SimilarityThresholds {
        self.thresholds
    }

    /// Returns `None` for pairs that fail the quality filter.
    pub fn score(
        &self,
        pair: MoviePairKey,
        samples: &[RatingPairSample],
    ) -> Option<SimilarityResult> {
        let (score, support) = cosine_similarity(samples);
        self.thresholds.accepts(score, support).then_some(SimilarityResult {
            pair,
            score,
            support,
        })
    }
}
