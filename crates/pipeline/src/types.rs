//! Records that flow between the grouping steps of the similarity job.
//!
//! Step 1 produces `UserHistory`, step 2 turns histories into
//! `(MoviePairKey, RatingPairSample)` records and reduces them to
//! `SimilarityResult`, step 3 resolves names into `RecommendationEntry`
//! values and groups them into one `RecommendationList` per movie.

use data_loader::{MovieId, UserId};
use serde::Serialize;
use std::fmt;

/// Every `(movie, rating)` observed for one user, in arrival order.
///
/// No deduplication: a movie rated twice by the same user appears twice.
#[derive(Debug, Clone, PartialEq)]
pub struct UserHistory {
    pub user_id: UserId,
    pub ratings: Vec<(MovieId, f64)>,
}

/// Directed movie pair used as a grouping key.
///
/// `movie_a != movie_b` is guaranteed by construction. Both directions of
/// every co-rated pair are emitted as separate keys, so `(a, b)` and
/// `(b, a)` are distinct keys with mirrored samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MoviePairKey {
    movie_a: MovieId,
    movie_b: MovieId,
}

impl MoviePairKey {
    /// Returns `None` when both ids are the same movie
    pub fn new(movie_a: MovieId, movie_b: MovieId) -> Option<Self> {
        (movie_a != movie_b).then_some(Self { movie_a, movie_b })
    }

    pub fn movie_a(&self) -> MovieId {
        self.movie_a
    }

    pub fn movie_b(&self) -> MovieId {
        self.movie_b
    }

    /// The same pair in the opposite direction
    pub fn reversed(&self) -> Self {
        Self {
            movie_a: self.movie_b,
            movie_b: self.movie_a,
        }
    }
}

impl fmt::Display for MoviePairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.movie_a, self.movie_b)
    }
}

/// One user's ratings for the two movies of a pair, in key order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingPairSample {
    pub rating_a: f64,
    pub rating_b: f64,
}

impl RatingPairSample {
    pub fn new(rating_a: f64, rating_b: f64) -> Self {
        Self { rating_a, rating_b }
    }

    pub fn reversed(&self) -> Self {
        Self {
            rating_a: self.rating_b,
            rating_b: self.rating_a,
        }
    }
}

/// A movie pair that passed the quality filter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityResult {
    pub pair: MoviePairKey,
    pub score: f64,
    /// Number of samples the score was computed from
    pub support: u32,
}

/// One similar movie in a recommendation list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationEntry {
    pub name: String,
    pub score: f64,
    pub support: u32,
}

impl fmt::Display for RecommendationEntry {
    /// Renders as `name[score][support]`, e.g. `Star Wars (1977)[0.987][54]`.
    ///
    /// The score uses the shortest round-trip form and always keeps a
    /// decimal point (`1.0`, not `1`). Scores below `1e-4` switch to
    /// exponent form without zero padding (`1e-5`). Only a very low
    /// `min_score` lets such scores through.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{:?}][{}]", self.name, self.score, self.support)
    }
}

/// Final output record: every qualifying similar movie for one source movie
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationList {
    pub movie: String,
    pub similar: Vec<RecommendationEntry>,
}
