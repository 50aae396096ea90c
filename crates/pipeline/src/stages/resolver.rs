//! Step 3 mapper: turn a scored id pair into a named recommendation entry.

use crate::error::LookupMiss;
use crate::types::{RecommendationEntry, SimilarityResult};
use data_loader::{MovieCatalog, MovieId};
use std::sync::Arc;

/// A scored pair with both movies resolved to display names
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEntry {
    /// Name of the pair's first movie; the grouping key of the last step
    pub source: String,
    pub entry: RecommendationEntry,
}

/// Resolves movie ids against a shared, read-only catalog.
#[derive(Debug, Clone)]
pub struct NameResolver {
    catalog: Arc<MovieCatalog>,
}

impl NameResolver {
    pub fn new(catalog: Arc<MovieCatalog>) -> Self {
        Self { catalog }
    }

    /// Look up both movies of `result`.
    ///
    /// Fails with the first id missing from the catalog (source movie
    /// checked first).
    pub fn resolve(&self, result: &SimilarityResult) -> Result<ResolvedEntry, LookupMiss> {
        let source = self.lookup(result.pair.movie_a())?;
        let other = self.lookup(result.pair.movie_b())?;

        Ok(ResolvedEntry {
            source: source.to_string(),
            entry: RecommendationEntry {
                name: other.to_string(),
                score: result.score,
                support: result.support,
            },
        })
    }

    fn lookup(&self, movie_id: MovieId) -> Result<&str, LookupMiss> {
        self.catalog
            .get_name(movie_id)
            .ok_or(LookupMiss { movie_id })
    }
}
