use crate::{
    catalog::Catalog,
    config::IndexMode,
    error::{AppError, AppResult},
    models::MovieRecord,
    services::{
        normalize::normalize_title,
        vectorizer::{VectorIndex, VectorizerOptions},
    },
};

/// Maximum number of movies returned by search and recommend
pub const RESULT_LIMIT: usize = 5;

/// A catalog entry with its similarity to the query
#[derive(Debug, Clone, Copy)]
pub struct ScoredMovie<'a> {
    pub movie: &'a MovieRecord,
    pub score: f32,
}

/// Read-only search context: a catalog and the vector index built over it.
///
/// Built once at startup and shared between requests.
pub struct Recommender {
    catalog: Catalog,
    index: VectorIndex,
    mode: IndexMode,
}

impl Recommender {
    /// Vectorizes every catalog entry according to `mode`
    pub fn new(catalog: Catalog, mode: IndexMode, options: VectorizerOptions) -> Self {
        let documents: Vec<String> = catalog
            .iter()
            .map(|movie| document_for(movie, mode))
            .collect();
        let index = VectorIndex::build(&documents, options);

        tracing::info!(
            total_movies = catalog.len(),
            vocabulary = index.vectorizer().vocabulary_len(),
            mode = ?mode,
            "Vector index built"
        );

        Self {
            catalog,
            index,
            mode,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn index(&self) -> &VectorIndex {
        &self.index
    }

    pub fn mode(&self) -> IndexMode {
        self.mode
    }

    /// Ranks the catalog against a free-text title query.
    ///
    /// Rejects queries that normalize to nothing.
    pub fn search(&self, query: &str) -> AppResult<Vec<ScoredMovie<'_>>> {
        if normalize_title(query).is_empty() {
            return Err(AppError::InvalidInput("Title too short".to_string()));
        }
        Ok(self.rank(query, None))
    }

    /// Movies similar to the one with `movie_id`, excluding that movie
    pub fn recommend(&self, movie_id: i64) -> AppResult<Vec<ScoredMovie<'_>>> {
        let position = self
            .catalog
            .position(movie_id)
            .ok_or_else(|| AppError::NotFound(format!("Movie with id {} not found", movie_id)))?;
        let title = self
            .catalog
            .get(position)
            .map(|movie| movie.title.as_str())
            .ok_or_else(|| AppError::Internal(format!("Catalog row {} missing", position)))?;

        Ok(self.rank(title, Some(position)))
    }

    /// Top results by descending score; equal scores keep catalog order
    fn rank(&self, query: &str, exclude: Option<usize>) -> Vec<ScoredMovie<'_>> {
        let query_vector = self.index.transform(&self.query_text(query));

        let mut scored: Vec<(usize, f32)> = self
            .index
            .similarities(&query_vector)
            .into_iter()
            .enumerate()
            .filter(|(position, _)| Some(*position) != exclude)
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        scored
            .into_iter()
            .take(RESULT_LIMIT)
            .filter_map(|(position, score)| {
                self.catalog
                    .get(position)
                    .map(|movie| ScoredMovie { movie, score })
            })
            .collect()
    }

    fn query_text(&self, query: &str) -> String {
        match self.mode {
            IndexMode::Titles => normalize_title(query),
            IndexMode::Content => query.to_string(),
        }
    }
}

fn document_for(movie: &MovieRecord, mode: IndexMode) -> String {
    match mode {
        IndexMode::Titles => normalize_title(movie.title.as_str()),
        IndexMode::Content => format!(
            "{} {} {}",
            movie.title,
            movie.overview,
            movie.genres.join(" ")
        ),
    }
}
