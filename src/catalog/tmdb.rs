//! Decoding of the TMDB movies CSV export.

use std::io::Read;

use chrono::NaiveDate;
use serde::Deserialize;

use super::Catalog;
use crate::{error::LoadError, models::MovieRecord};

/// Columns we read from `tmdb_5000_movies.csv`; the rest are ignored
#[derive(Debug, Deserialize)]
struct MovieRow {
    id: i64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    genres: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    vote_average: Option<f32>,
}

impl From<MovieRow> for MovieRecord {
    fn from(row: MovieRow) -> Self {
        Self {
            id: row.id,
            title: row.title.unwrap_or_default(),
            overview: row.overview.unwrap_or_default(),
            genres: row.genres.as_deref().map(parse_genres).unwrap_or_default(),
            release_year: row.release_date.as_deref().and_then(parse_release_year),
            rating: row.vote_average,
        }
    }
}

#[derive(Deserialize)]
struct GenreEntry {
    name: String,
}

/// Parses a TMDB genres cell such as `[{"id": 28, "name": "Action"}]`.
///
/// Malformed input yields an empty list.
pub fn parse_genres(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Vec<GenreEntry>>(raw) {
        Ok(entries) => entries.into_iter().map(|g| g.name).collect(),
        Err(e) => {
            tracing::debug!(error = %e, "Unparseable genres cell");
            Vec::new()
        }
    }
}

/// Extracts the year from a `YYYY-MM-DD` release date
pub fn parse_release_year(raw: &str) -> Option<i32> {
    use chrono::Datelike;

    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .ok()
        .map(|date| date.year())
}

/// Decodes a movies CSV into a catalog.
///
/// Rows that fail to decode are skipped and counted. A source that yields no
/// usable rows is an error so the caller can fall back.
pub fn parse_movies_csv<R: Read>(reader: R) -> Result<Catalog, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for row in csv_reader.deserialize::<MovieRow>() {
        match row {
            Ok(row) => records.push(MovieRecord::from(row)),
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping malformed movie row");
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, parsed = records.len(), "Skipped malformed movie rows");
    }

    if records.is_empty() {
        return Err(LoadError::Empty);
    }

    Ok(Catalog::new(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOVIES_CSV: &str = "\
budget,genres,id,overview,release_date,title,vote_average,vote_count
237000000,\"[{\"\"id\"\": 28, \"\"name\"\": \"\"Action\"\"}, {\"\"id\"\": 12, \"\"name\"\": \"\"Adventure\"\"}]\",19995,\"In the 22nd century, a paraplegic Marine is dispatched to the moon Pandora.\",2009-12-10,Avatar,7.2,11800
160000000,\"[{\"\"id\"\": 28, \"\"name\"\": \"\"Action\"\"}]\",27205,\"Cobb, a skilled thief, steals secrets.\",2010-07-14,Inception,8.1,13752
0,[],459488,,,Untitled Project,,0
";

    #[test]
    fn test_parse_genres() {
        let genres = parse_genres(r#"[{"id": 28, "name": "Action"}, {"id": 80, "name": "Crime"}]"#);
        assert_eq!(genres, vec!["Action", "Crime"]);
    }

    #[test]
    fn test_parse_genres_malformed() {
        assert!(parse_genres("[{'id': 28").is_empty());
        assert!(parse_genres("").is_empty());
        assert!(parse_genres("[]").is_empty());
    }

    #[test]
    fn test_parse_release_year() {
        assert_eq!(parse_release_year("1999-03-31"), Some(1999));
        assert_eq!(parse_release_year(""), None);
        assert_eq!(parse_release_year("sometime"), None);
    }

    #[test]
    fn test_parse_movies_csv() {
        let catalog = parse_movies_csv(MOVIES_CSV.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 3);

        let avatar = catalog.find_by_id(19995).unwrap();
        assert_eq!(avatar.title, "Avatar");
        assert_eq!(avatar.genres, vec!["Action", "Adventure"]);
        assert_eq!(avatar.release_year, Some(2009));
        assert_eq!(avatar.rating, Some(7.2));
        assert!(avatar.overview.starts_with("In the 22nd century"));

        let untitled = catalog.find_by_id(459488).unwrap();
        assert!(untitled.genres.is_empty());
        assert_eq!(untitled.release_year, None);
        assert_eq!(untitled.rating, None);
        assert!(untitled.overview.is_empty());
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let csv = "id,title\nnot-a-number,Broken\n7,Seven\n";
        let catalog = parse_movies_csv(csv.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(0).unwrap().title, "Seven");
    }

    #[test]
    fn test_no_rows_is_an_error() {
        let result = parse_movies_csv("id,title\n".as_bytes());
        assert!(matches!(result, Err(LoadError::Empty)));
    }
}
