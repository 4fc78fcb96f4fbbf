//! In-memory movie catalog.
//!
//! Row positions are stable for the lifetime of a [`Catalog`] and are what the
//! vector index aligns against.

use std::collections::HashMap;

use crate::models::MovieRecord;

pub mod tmdb;
pub mod sample;

pub use tmdb::{parse_genres, parse_movies_csv, parse_release_year};
pub use sample::sample_catalog;

/// Ordered movie records, addressable by row and by id
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: Vec<MovieRecord>,
    by_id: HashMap<i64, usize>,
}

impl Catalog {
    /// Builds a catalog, keeping the first record seen for each id
    pub fn new(records: impl IntoIterator<Item = MovieRecord>) -> Self {
        let mut movies = Vec::new();
        let mut by_id = HashMap::new();
        let mut duplicates = 0usize;

        for record in records {
            if by_id.contains_key(&record.id) {
                duplicates += 1;
                continue;
            }
            by_id.insert(record.id, movies.len());
            movies.push(record);
        }

        if duplicates > 0 {
            tracing::warn!(duplicates, "Dropped movies with duplicate ids");
        }

        Self { movies, by_id }
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Record at a row position
    pub fn get(&self, row: usize) -> Option<&MovieRecord> {
        self.movies.get(row)
    }

    /// Row position of the record with the given id
    pub fn position(&self, id: i64) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    pub fn find_by_id(&self, id: i64) -> Option<&MovieRecord> {
        self.position(id).and_then(|row| self.movies.get(row))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MovieRecord> {
        self.movies.iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a MovieRecord;
    type IntoIter = std::slice::Iter<'a, MovieRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: i64, title: &str) -> MovieRecord {
        MovieRecord {
            id,
            title: title.to_string(),
            overview: String::new(),
            genres: vec![],
            release_year: None,
            rating: None,
        }
    }

    #[test]
    fn test_rows_follow_insertion_order() {
        let catalog = Catalog::new(vec![movie(10, "Heat"), movie(3, "Alien")]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(0).unwrap().title, "Heat");
        assert_eq!(catalog.position(3), Some(1));
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let catalog = Catalog::new(vec![movie(1, "First"), movie(1, "Second"), movie(2, "Other")]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.find_by_id(1).unwrap().title, "First");
        assert_eq!(catalog.position(2), Some(1));
    }

    #[test]
    fn test_unknown_id() {
        let catalog = Catalog::new(vec![movie(1, "Heat")]);
        assert!(catalog.find_by_id(99).is_none());
        assert!(catalog.get(5).is_none());
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::default();
        assert!(catalog.is_empty());
        assert_eq!(catalog.iter().count(), 0);
    }
}
