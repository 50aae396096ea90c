//! # Data Loader Crate
//!
//! Reads the two inputs of the similarity job:
//!
//! - **parser**: rating lines (`userId movieId rating timestamp`) and
//!   pipe-delimited catalog lines
//! - **catalog**: loading the read-only `MovieCatalog`
//! - **types**: `Rating`, `MovieCatalog`, id aliases
//! - **error**: `DataLoadError`
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{parser, MovieCatalog};
//! use std::path::Path;
//!
//! let catalog = MovieCatalog::load_from_file(Path::new("data/ml-100k/u.item"))?;
//! let lines = parser::read_lines_latin1(Path::new("data/ml-100k/u.data"))?;
//! let parsed = parser::parse_ratings(&lines, "u.data");
//!
//! println!("{} ratings, {} malformed", parsed.ratings.len(), parsed.malformed.len());
//! ```

pub mod error;
pub mod types;
pub mod parser;
pub mod catalog;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use parser::{parse_rating_line, parse_ratings, ParsedRatings};
pub use types::{MovieCatalog, MovieId, Rating, UserId};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_catalog() {
        let catalog = MovieCatalog::default();
        assert!(catalog.is_empty());
        assert_eq!(catalog.get_name(1), None);
    }

    #[test]
    fn test_catalog_from_iter() {
        let catalog: MovieCatalog = vec![(1, "A".to_string()), (2, "B".to_string())]
            .into_iter()
            .collect();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains(2));
        assert!(!catalog.contains(3));
    }

    #[test]
    fn test_rating_fields() {
        let rating = parse_rating_line("42 1193 5 978300760", 1, "ratings").unwrap();
        assert_eq!(
            rating,
            Rating {
                user_id: "42".to_string(),
                movie_id: 1193,
                rating: 5.0,
                timestamp: Some(978300760),
            }
        );
    }
}
