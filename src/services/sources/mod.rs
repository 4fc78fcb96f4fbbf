//! Catalog source abstraction
//!
//! A source produces the full movie catalog once at startup. Sources are
//! interchangeable so the server can read a local TMDB export, fetch one over
//! HTTP, or serve the built-in sample set.
use serde::Serialize;

use crate::{
    catalog::{sample_catalog, Catalog},
    config::Config,
    error::LoadError,
};

pub mod file;
pub mod http;
pub mod sample;

pub use file::FileCsvSource;
pub use http::HttpCsvSource;
pub use sample::SampleSource;

/// Trait for catalog sources
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Load every movie the source provides
    async fn load(&self) -> Result<Catalog, LoadError>;

    /// Where the catalog comes from
    fn origin(&self) -> CatalogOrigin;
}

/// Where the catalog being served was loaded from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "location", rename_all = "snake_case")]
pub enum CatalogOrigin {
    Url(String),
    File(String),
    Sample,
}

impl CatalogOrigin {
    pub fn is_sample(&self) -> bool {
        matches!(self, CatalogOrigin::Sample)
    }
}

impl std::fmt::Display for CatalogOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogOrigin::Url(url) => write!(f, "url:{}", url),
            CatalogOrigin::File(path) => write!(f, "file:{}", path),
            CatalogOrigin::Sample => write!(f, "sample"),
        }
    }
}

/// A catalog together with the origin it was actually loaded from
#[derive(Debug)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub origin: CatalogOrigin,
}

/// Picks the source described by the configuration
pub fn source_from_config(config: &Config) -> Box<dyn CatalogSource> {
    if config.use_sample_data {
        return Box::new(SampleSource);
    }

    match &config.movies_url {
        Some(url) => Box::new(HttpCsvSource::new(url.clone())),
        None => Box::new(FileCsvSource::new(config.movies_path())),
    }
}

/// Loads from `source`, falling back to the sample catalog on any failure
pub async fn load_or_sample(source: &dyn CatalogSource) -> LoadedCatalog {
    let origin = source.origin();

    match source.load().await {
        Ok(catalog) => {
            tracing::info!(origin = %origin, total_movies = catalog.len(), "Catalog loaded");
            LoadedCatalog { catalog, origin }
        }
        Err(e) => {
            tracing::warn!(
                origin = %origin,
                error = %e,
                "Catalog source unavailable, using sample data"
            );
            LoadedCatalog {
                catalog: sample_catalog(),
                origin: CatalogOrigin::Sample,
            }
        }
    }
}
