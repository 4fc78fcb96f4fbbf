use std::path::PathBuf;

use crate::{
    catalog::{parse_movies_csv, Catalog},
    error::LoadError,
    services::sources::{CatalogOrigin, CatalogSource},
};

/// Movies CSV read from the local data directory
#[derive(Debug, Clone)]
pub struct FileCsvSource {
    path: PathBuf,
}

impl FileCsvSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait::async_trait]
impl CatalogSource for FileCsvSource {
    async fn load(&self) -> Result<Catalog, LoadError> {
        tracing::info!(path = %self.path.display(), "Reading movies CSV");

        let bytes = tokio::fs::read(&self.path).await?;
        parse_movies_csv(bytes.as_slice())
    }

    fn origin(&self) -> CatalogOrigin {
        CatalogOrigin::File(self.path.display().to_string())
    }
}
