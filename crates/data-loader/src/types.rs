//! Core domain types for rating records and the movie catalog.
//!
//! Key points:
//! - Type aliases for domain clarity (UserId, MovieId)
//! - `Rating` is produced once per input line and never modified afterwards
//! - `MovieCatalog` is built once and only read from afterwards

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Identifier for a user.
///
/// Users are only ever grouped and compared for equality, never parsed,
/// so the raw token from the input line is kept as-is.
pub type UserId = String;

/// Numeric identifier for a movie (field 0 of the catalog file)
pub type MovieId = u32;

// =============================================================================
// Rating Type
// =============================================================================

/// A single rating from a user for a movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    /// Rating value, typically 1.0 to 5.0
    pub rating: f64,
    /// Unix timestamp when rating was made.
    ///
    /// Carried for completeness only; nothing downstream reads it, and a
    /// non-numeric timestamp does not make the line malformed.
    pub timestamp: Option<i64>,
}

// =============================================================================
// MovieCatalog - read-only id -> display name table
// =============================================================================

/// Lookup table from movie id to display name.
///
/// There are no mutators: a catalog is assembled once (see
/// `MovieCatalog::load_from_file` / `MovieCatalog::from_lines`) and then
/// shared behind an `Arc` by every worker that resolves names.
#[derive(Debug, Clone, Default)]
pub struct MovieCatalog {
    pub(crate) names: HashMap<MovieId, String>,
}

impl MovieCatalog {
    /// Get the display name for a movie
    pub fn get_name(&self, id: MovieId) -> Option<&str> {
        self.names.get(&id).map(|s| s.as_str())
    }

    pub fn contains(&self, id: MovieId) -> bool {
        self.names.contains_key(&id)
    }

    /// Number of movies in the catalog
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<(MovieId, String)> for MovieCatalog {
    fn from_iter<I: IntoIterator<Item = (MovieId, String)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}
