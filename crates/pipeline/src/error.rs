//! Error types for the pipeline crate.

use data_loader::MovieId;
use thiserror::Error;

/// A movie id from a scored pair has no entry in the catalog.
///
/// This is the not-found outcome of name resolution. The job counts these
/// and drops the pair; it never aborts a run.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Movie {movie_id} not found in catalog")]
pub struct LookupMiss {
    pub movie_id: MovieId,
}
