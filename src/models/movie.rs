use serde::{Deserialize, Serialize};

/// A single catalog entry, immutable once the catalog is loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Catalog-unique identifier (TMDB id for CSV sources)
    pub id: i64,
    pub title: String,
    /// Plot summary; empty when the source has none
    #[serde(default)]
    pub overview: String,
    pub genres: Vec<String>,
    pub release_year: Option<i32>,
    /// Average user vote
    pub rating: Option<f32>,
}

/// Movie shape returned by the search and recommend endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: i64,
    pub title: String,
    pub genres: Vec<String>,
    pub year: Option<i32>,
    pub rating: Option<f32>,
}

impl From<&MovieRecord> for MovieSummary {
    fn from(movie: &MovieRecord) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            genres: movie.genres.clone(),
            year: movie.release_year,
            rating: movie.rating,
        }
    }
}

/// Compact movie shape returned when listing the whole catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieListing {
    pub id: i64,
    pub title: String,
    pub genres: Vec<String>,
}

impl From<&MovieRecord> for MovieListing {
    fn from(movie: &MovieRecord) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            genres: movie.genres.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inception() -> MovieRecord {
        MovieRecord {
            id: 27205,
            title: "Inception".to_string(),
            overview: "Cobb steals secrets from dreams.".to_string(),
            genres: vec!["Action".to_string(), "Science Fiction".to_string()],
            release_year: Some(2010),
            rating: Some(8.1),
        }
    }

    #[test]
    fn test_summary_from_record() {
        let summary = MovieSummary::from(&inception());
        assert_eq!(summary.id, 27205);
        assert_eq!(summary.year, Some(2010));
        assert_eq!(summary.genres.len(), 2);
    }

    #[test]
    fn test_summary_serializes_missing_year_as_null() {
        let mut movie = inception();
        movie.release_year = None;
        movie.rating = None;

        let json = serde_json::to_value(MovieSummary::from(&movie)).unwrap();
        assert!(json["year"].is_null());
        assert!(json["rating"].is_null());
        assert_eq!(json["title"], "Inception");
    }

    #[test]
    fn test_listing_omits_year_and_rating() {
        let json = serde_json::to_value(MovieListing::from(&inception())).unwrap();
        assert!(json.get("year").is_none());
        assert!(json.get("rating").is_none());
        assert_eq!(json["genres"][1], "Science Fiction");
    }
}
