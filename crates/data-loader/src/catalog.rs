//! MovieCatalog loading.
//!
//! The catalog is reference data distributed to every resolution worker, so
//! loading is strict: an unreadable file or a malformed line fails the load
//! instead of silently producing a partial table.

use crate::error::Result;
use crate::parser;
use crate::types::*;
use std::path::Path;
use tracing::info;

impl MovieCatalog {
    /// Load the catalog from a pipe-delimited file such as MovieLens `u.item`
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let lines = parser::read_lines_latin1(path)?;
        let file = path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let catalog = Self::from_lines(&lines, &file)?;
        info!("Loaded {} movie names from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Build the catalog from already-read lines.
    ///
    /// Blank lines are skipped. If an id appears twice the later line wins.
    pub fn from_lines<S: AsRef<str>>(lines: &[S], file: &str) -> Result<Self> {
        let mut names = std::collections::HashMap::with_capacity(lines.len());
        for (idx, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }
            let (movie_id, name) = parser::parse_catalog_line(line, idx + 1, file)?;
            names.insert(movie_id, name);
        }
        Ok(Self { names })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataLoadError;
    use std::fs;

    #[test]
    fn test_from_lines() {
        let lines = [
            "1|Toy Story (1995)|01-Jan-1995",
            "",
            "2|GoldenEye (1995)|01-Jan-1995",
        ];
        let catalog = MovieCatalog::from_lines(&lines, "u.item").unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get_name(1), Some("Toy Story (1995)"));
        assert_eq!(catalog.get_name(2), Some("GoldenEye (1995)"));
        assert_eq!(catalog.get_name(3), None);
    }

    #[test]
    fn test_later_duplicate_wins() {
        let lines = ["7|First", "7|Second"];
        let catalog = MovieCatalog::from_lines(&lines, "u.item").unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get_name(7), Some("Second"));
    }

    #[test]
    fn test_malformed_line_fails_load() {
        let lines = ["1|Toy Story (1995)", "two|GoldenEye (1995)"];
        let err = MovieCatalog::from_lines(&lines, "u.item").unwrap_err();
        assert!(matches!(err, DataLoadError::ParseError { line: 2, .. }));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("catalog-test-{}.item", std::process::id()));
        fs::write(&path, b"1|Toy Story (1995)|x\n2|Se\xf1or (1996)|y\n").unwrap();

        let catalog = MovieCatalog::load_from_file(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get_name(2), Some("Señor (1996)"));
    }

    #[test]
    fn test_missing_file() {
        let result = MovieCatalog::load_from_file(Path::new("/nonexistent/u.item"));
        assert!(matches!(result, Err(DataLoadError::IoError(_))));
    }
}
