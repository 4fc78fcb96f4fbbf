use std::path::PathBuf;
use std::sync::Arc;

use crate::{
    catalog::sample_catalog,
    config::{Config, IndexMode},
    services::{
        sources::{CatalogOrigin, LoadedCatalog},
        Recommender, VectorizerOptions,
    },
};

/// Shared application state.
///
/// Everything here is read-only after startup, so handlers share it without locks.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
    pub origin: CatalogOrigin,
    pub data_files: Arc<DataFiles>,
}

/// Expected locations of the TMDB CSV exports, reported by the diagnostics endpoint
#[derive(Debug, Clone)]
pub struct DataFiles {
    pub movies_path: PathBuf,
    pub credits_path: PathBuf,
}

impl AppState {
    /// Builds the vector index over a loaded catalog.
    ///
    /// The sample catalog is always indexed by title.
    pub fn new(loaded: LoadedCatalog, config: &Config) -> Self {
        let (mode, options) = if loaded.origin.is_sample() {
            (IndexMode::Titles, VectorizerOptions::titles())
        } else {
            (config.index_mode, config.vectorizer_options())
        };
        let recommender = Recommender::new(loaded.catalog, mode, options);

        Self {
            recommender: Arc::new(recommender),
            origin: loaded.origin,
            data_files: Arc::new(DataFiles {
                movies_path: config.movies_path(),
                credits_path: config.credits_path(),
            }),
        }
    }

    /// State over the built-in sample catalog with default configuration
    pub fn sample() -> Self {
        Self::new(
            LoadedCatalog {
                catalog: sample_catalog(),
                origin: CatalogOrigin::Sample,
            },
            &Config::default(),
        )
    }
}
