//! Step 2 mapper: expand a user history into directed pair samples.
//!
//! ## Algorithm
//! For every unordered combination of two entries of the history
//! `((a, ra), (b, rb))`, emit both directions:
//! - `(a, b) -> (ra, rb)`
//! - `(b, a) -> (rb, ra)`
//!
//! A history of `n` distinct movies yields `n * (n - 1)` samples, so users
//! with very long histories dominate the total work of the job.

use crate::types::{MoviePairKey, RatingPairSample, UserHistory};

/// Samples produced from one history
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairSamples {
    pub samples: Vec<(MoviePairKey, RatingPairSample)>,
    /// Combinations skipped because both entries were the same movie
    /// (a user who rated one movie more than once)
    pub self_pairs_skipped: usize,
}

/// Generate both directed samples for every pair of entries in `history`.
pub fn generate_pairs(history: &UserHistory) -> PairSamples {
    let ratings = &history.ratings;
    let n = ratings.len();
    let mut out = PairSamples {
        samples: Vec::with_capacity(n.saturating_sub(1) * n),
        self_pairs_skipped: 0,
    };

    for i in 0..n {
        let (movie_a, rating_a) = ratings[i];
        for &(movie_b, rating_b) in &ratings[i + 1..] {
            let Some(key) = MoviePairKey::new(movie_a, movie_b) else {
                out.self_pairs_skipped += 1;
                continue;
            };
            let sample = RatingPairSample::new(rating_a, rating_b);

            out.samples.push((key, sample));
            out.samples.push((key.reversed(), sample.reversed()));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(ratings: Vec<(u32, f64)>) -> UserHistory {
        UserHistory {
            user_id: "u1".to_string(),
            ratings,
        }
    }

    fn key(a: u32, b: u32) -> MoviePairKey {
        MoviePairKey::new(a, b).unwrap()
    }

    #[test]
    fn test_three_movie_history() {
        let pairs = generate_pairs(&history(vec![(1, 5.0), (2, 5.0), (3, 1.0)]));

        assert_eq!(
            pairs.samples,
            vec![
                (key(1, 2), RatingPairSample::new(5.0, 5.0)),
                (key(2, 1), RatingPairSample::new(5.0, 5.0)),
                (key(1, 3), RatingPairSample::new(5.0, 1.0)),
                (key(3, 1), RatingPairSample::new(1.0, 5.0)),
                (key(2, 3), RatingPairSample::new(5.0, 1.0)),
                (key(3, 2), RatingPairSample::new(1.0, 5.0)),
            ]
        );
        assert_eq!(pairs.self_pairs_skipped, 0);
    }

    #[test]
    fn test_sample_count_is_n_times_n_minus_one() {
        for n in 0..12u32 {
            let ratings = (0..n).map(|m| (m, 3.0)).collect();
            let pairs = generate_pairs(&history(ratings));
            assert_eq!(pairs.samples.len(), (n * n.saturating_sub(1)) as usize);
        }
    }

    #[test]
    fn test_repeated_movie_never_pairs_with_itself() {
        let pairs = generate_pairs(&history(vec![(1, 5.0), (1, 4.0), (2, 3.0)]));

        assert_eq!(pairs.self_pairs_skipped, 1);
        // (1,5)x(2,3) and (1,4)x(2,3), both directions
        assert_eq!(pairs.samples.len(), 4);
        assert!(pairs.samples.iter().all(|(k, _)| k.movie_a() != k.movie_b()));
    }

    #[test]
    fn test_single_rating_produces_nothing() {
        let pairs = generate_pairs(&history(vec![(7, 4.0)]));
        assert!(pairs.samples.is_empty());
    }
}
