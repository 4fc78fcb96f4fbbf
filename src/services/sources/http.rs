//! Movies CSV fetched over HTTP
//!
//! The whole export is downloaded once and decoded in memory.
use reqwest::Client as HttpClient;

use crate::{
    catalog::{parse_movies_csv, Catalog},
    error::LoadError,
    services::sources::{CatalogOrigin, CatalogSource},
};

#[derive(Clone)]
pub struct HttpCsvSource {
    http_client: HttpClient,
    url: String,
}

impl HttpCsvSource {
    pub fn new(url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            url,
        }
    }
}

#[async_trait::async_trait]
impl CatalogSource for HttpCsvSource {
    async fn load(&self) -> Result<Catalog, LoadError> {
        tracing::info!(url = %self.url, "Fetching movies CSV");

        let response = self.http_client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(LoadError::Status(response.status().as_u16()));
        }

        let body = response.bytes().await?;
        parse_movies_csv(body.as_ref())
    }

    fn origin(&self) -> CatalogOrigin {
        CatalogOrigin::Url(self.url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_url_is_load_error() {
        // Port 9 (discard) on localhost is not expected to serve HTTP.
        let source = HttpCsvSource::new("http://127.0.0.1:9/tmdb_5000_movies.csv".to_string());
        assert!(matches!(source.load().await, Err(LoadError::Http(_))));
    }
}
