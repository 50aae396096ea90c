//! Step 3 reducer: collect every entry for one source movie.

use crate::types::{RecommendationEntry, RecommendationList};

/// Build the final record for `movie` from all of its entries, in the
/// order they were grouped.
pub fn group_results(movie: String, entries: Vec<RecommendationEntry>) -> RecommendationList {
    RecommendationList {
        movie,
        similar: entries,
    }
}
