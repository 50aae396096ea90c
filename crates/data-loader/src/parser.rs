//! Parsers for the two input formats:
//! - rating lines: `userId movieId rating timestamp`, whitespace-separated
//! - catalog lines: `movieId|title|...`, pipe-separated (MovieLens `u.item`)
//!
//! A malformed rating line is an error for that line only; `parse_ratings`
//! collects those errors next to the good records so the caller can count
//! and drop them. Catalog lines are parsed strictly by `MovieCatalog`.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use rayon::prelude::*;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Number of whitespace-separated fields in a rating line
pub const RATING_FIELDS: usize = 4;

/// Read a file with ISO-8859-1 encoding (Latin-1)
///
/// MovieLens files (`u.item` in particular) are Latin-1, not UTF-8.
pub fn read_lines_latin1(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)?;
    read_lines_latin1_from(file)
}

/// Same as `read_lines_latin1` for an arbitrary reader (e.g. stdin)
pub fn read_lines_latin1_from<R: Read>(mut reader: R) -> Result<Vec<String>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    // Each Latin-1 byte maps directly to the Unicode code point of the same value
    let content: String = bytes.iter().map(|&b| b as char).collect();

    Ok(content.lines().map(|s| s.to_string()).collect())
}

/// Parse one rating line.
///
/// Exactly four fields are required. `movieId` must be an integer and
/// `rating` a finite number; the timestamp is kept only if it is numeric.
pub fn parse_rating_line(line: &str, line_no: usize, file: &str) -> Result<Rating> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != RATING_FIELDS {
        return Err(DataLoadError::FieldCountMismatch {
            expected: RATING_FIELDS,
            found: fields.len(),
            line: line_no,
        });
    }

    let movie_id: MovieId = fields[1].parse().map_err(|e| DataLoadError::ParseError {
        file: file.to_string(),
        line: line_no,
        reason: format!("Invalid movieId: {}", e),
    })?;

    let rating: f64 = fields[2].parse().map_err(|e| DataLoadError::ParseError {
        file: file.to_string(),
        line: line_no,
        reason: format!("Invalid rating: {}", e),
    })?;
    if !rating.is_finite() {
        return Err(DataLoadError::InvalidValue {
            field: "rating".to_string(),
            value: fields[2].to_string(),
        });
    }

    Ok(Rating {
        user_id: fields[0].to_string(),
        movie_id,
        rating,
        timestamp: fields[3].parse().ok(),
    })
}

/// Outcome of parsing a batch of rating lines
#[derive(Debug, Default)]
pub struct ParsedRatings {
    /// Successfully parsed records, in input order
    pub ratings: Vec<Rating>,
    /// One error per dropped line
    pub malformed: Vec<DataLoadError>,
    /// Empty or whitespace-only lines (skipped, not errors)
    pub blank_lines: usize,
}

impl ParsedRatings {
    /// Append the outcome of parsing another input
    pub fn merge(&mut self, other: ParsedRatings) {
        self.ratings.extend(other.ratings);
        self.malformed.extend(other.malformed);
        self.blank_lines += other.blank_lines;
    }
}

/// Parse every rating line in parallel, keeping input order.
///
/// Never fails as a whole: bad lines end up in `ParsedRatings::malformed`.
pub fn parse_ratings(lines: &[String], file: &str) -> ParsedRatings {
    let results: Vec<Option<Result<Rating>>> = lines
        .par_iter()
        .enumerate()
        .map(|(idx, line)| {
            if line.trim().is_empty() {
                None
            } else {
                Some(parse_rating_line(line, idx + 1, file))
            }
        })
        .collect();

    let mut parsed = ParsedRatings::default();
    for result in results {
        match result {
            None => parsed.blank_lines += 1,
            Some(Ok(rating)) => parsed.ratings.push(rating),
            Some(Err(e)) => parsed.malformed.push(e),
        }
    }
    parsed
}

/// Parse one catalog line: field 0 is the numeric id, field 1 the name.
/// Any further fields (release date, genre flags, ...) are ignored.
pub fn parse_catalog_line(line: &str, line_no: usize, file: &str) -> Result<(MovieId, String)> {
    let mut parts = line.split('|');

    let movie_id: MovieId = parts
        .next()
        .ok_or_else(|| DataLoadError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason: "Missing movieId".to_string(),
        })?
        .trim()
        .parse()
        .map_err(|e| DataLoadError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason: format!("Invalid movieId: {}", e),
        })?;

    let name = parts.next().ok_or_else(|| DataLoadError::ParseError {
        file: file.to_string(),
        line: line_no,
        reason: "Missing title".to_string(),
    })?;

    Ok((movie_id, name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rating_line() {
        let rating = parse_rating_line("196\t242\t3\t881250949", 1, "u.data").unwrap();
        assert_eq!(rating.user_id, "196");
        assert_eq!(rating.movie_id, 242);
        assert_eq!(rating.rating, 3.0);
        assert_eq!(rating.timestamp, Some(881250949));
    }

    #[test]
    fn test_rating_line_too_few_fields() {
        let err = parse_rating_line("196 242 3", 7, "u.data").unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::FieldCountMismatch { expected: 4, found: 3, line: 7 }
        ));
    }

    #[test]
    fn test_rating_line_too_many_fields() {
        let err = parse_rating_line("196 242 3 881250949 extra", 1, "u.data").unwrap_err();
        assert!(matches!(err, DataLoadError::FieldCountMismatch { found: 5, .. }));
    }

    #[test]
    fn test_rating_line_non_numeric() {
        assert!(matches!(
            parse_rating_line("196 abc 3 881250949", 1, "u.data"),
            Err(DataLoadError::ParseError { .. })
        ));
        assert!(matches!(
            parse_rating_line("196 242 good 881250949", 1, "u.data"),
            Err(DataLoadError::ParseError { .. })
        ));
        assert!(matches!(
            parse_rating_line("196 242 NaN 881250949", 1, "u.data"),
            Err(DataLoadError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_rating_keeps_double_precision() {
        let rating = parse_rating_line("u1 1 4.1 0", 1, "u.data").unwrap();
        assert_eq!(rating.rating, 4.1_f64);

        let rating = parse_rating_line("u1 1 1e39 0", 1, "u.data").unwrap();
        assert_eq!(rating.rating, 1e39);
    }

    #[test]
    fn test_timestamp_is_ignored() {
        let rating = parse_rating_line("u1 1 4.5 yesterday", 1, "u.data").unwrap();
        assert_eq!(rating.rating, 4.5);
        assert_eq!(rating.timestamp, None);
    }

    #[test]
    fn test_parse_ratings_drops_bad_lines() {
        let lines: Vec<String> = ["1 10 5 0", "", "garbage", "2 11 4 0", "   "]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let parsed = parse_ratings(&lines, "u.data");
        assert_eq!(parsed.ratings.len(), 2);
        assert_eq!(parsed.malformed.len(), 1);
        assert_eq!(parsed.blank_lines, 2);
        assert_eq!(parsed.ratings[0].movie_id, 10);
        assert_eq!(parsed.ratings[1].movie_id, 11);
    }

    #[test]
    fn test_merge() {
        let first = parse_ratings(&["1 10 5 0".to_string(), "x".to_string()], "a.data");
        let mut all = parse_ratings(&["2 11 4 0".to_string(), String::new()], "b.data");
        all.merge(first);

        assert_eq!(all.ratings.len(), 2);
        assert_eq!(all.malformed.len(), 1);
        assert_eq!(all.blank_lines, 1);
        assert_eq!(all.ratings[1].user_id, "1");
    }

    #[test]
    fn test_parse_catalog_line() {
        let line = concat!(
            "1|Toy Story (1995)|01-Jan-1995||",
            "http://us.imdb.com/M/title-exact?Toy%20Story%20(1995)|0|0|0|1"
        );
        let (id, name) = parse_catalog_line(line, 1, "u.item").unwrap();
        assert_eq!(id, 1);
        assert_eq!(name, "Toy Story (1995)");
    }

    #[test]
    fn test_parse_catalog_line_errors() {
        assert!(parse_catalog_line("x|Name", 1, "u.item").is_err());
        assert!(parse_catalog_line("12", 1, "u.item").is_err());
    }

    #[test]
    fn test_latin1_decoding() {
        let bytes: &[u8] = b"1|Caf\xe9 (1995)\n";
        let lines = read_lines_latin1_from(bytes).unwrap();
        assert_eq!(lines, vec!["1|Café (1995)".to_string()]);
    }
}
