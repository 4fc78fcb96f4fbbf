use super::Catalog;
use crate::models::MovieRecord;

/// Built-in catalog served when no CSV source can be loaded
pub fn sample_catalog() -> Catalog {
    let sample = [
        (1, "The Dark Knight", "Action", 2008, 9.0),
        (2, "Inception", "Action", 2010, 8.8),
        (3, "Avatar", "Adventure", 2009, 7.8),
        (4, "The Matrix", "Action", 1999, 8.7),
        (5, "Pulp Fiction", "Crime", 1994, 8.9),
    ];

    Catalog::new(sample.into_iter().map(|(id, title, genre, year, rating)| MovieRecord {
        id,
        title: title.to_string(),
        overview: String::new(),
        genres: vec![genre.to_string()],
        release_year: Some(year),
        rating: Some(rating),
    }))
}
