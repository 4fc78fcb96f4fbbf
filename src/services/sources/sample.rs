use crate::{
    catalog::{sample_catalog, Catalog},
    error::LoadError,
    services::sources::{CatalogOrigin, CatalogSource},
};

/// Serves the built-in five-movie catalog; never fails
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleSource;

#[async_trait::async_trait]
impl CatalogSource for SampleSource {
    async fn load(&self) -> Result<Catalog, LoadError> {
        Ok(sample_catalog())
    }

    fn origin(&self) -> CatalogOrigin {
        CatalogOrigin::Sample
    }
}
