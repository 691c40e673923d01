//! Mock provider for tests and development.
//!
//! Generates deterministic synthetic results without touching the network,
//! and supports error injection for exercising the manager's degradation
//! paths.

use async_trait::async_trait;

use crate::http::Session;
use crate::model::ImageResult;
use crate::provider::{ProviderError, StockImageProvider};

/// A provider that fabricates results instead of calling an upstream API.
#[derive(Debug, Clone)]
pub struct MockProvider {
    name: &'static str,
    source: &'static str,
    fail: bool,
}

impl MockProvider {
    /// Create a mock registered under `name`, reporting `source` as the
    /// human-readable provider name.
    pub fn new(name: &'static str, source: &'static str) -> Self {
        Self {
            name,
            source,
            fail: false,
        }
    }

    /// Make every call fail with an upstream-style error.
    pub fn with_failure(mut self) -> Self {
        self.fail = true;
        self
    }

    fn synthesize(&self, native_id: &str, query: &str) -> ImageResult {
        ImageResult {
            id: ImageResult::prefixed_id(self.name, native_id),
            title: format!("{} {}", query, native_id),
            description: Some(format!("Synthetic result for '{}'", query)),
            url: format!("https://images.example.com/{}/{}/large.jpg", self.name, native_id),
            thumbnail: format!(
                "https://images.example.com/{}/{}/medium.jpg",
                self.name, native_id
            ),
            width: 1920,
            height: 1080,
            photographer: "Test Photographer".to_string(),
            photographer_url: Some("https://example.com/test-photographer".to_string()),
            source: self.source.to_string(),
            license: "Free to use".to_string(),
            attribution_url: Some(format!(
                "https://example.com/{}/photos/{}",
                self.name, native_id
            )),
            tags: vec![query.to_lowercase()],
        }
    }

    fn injected_error(&self) -> ProviderError {
        ProviderError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            body: "injected failure".to_string(),
        }
    }
}

#[async_trait]
impl StockImageProvider for MockProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn search(
        &self,
        session: &Session,
        query: &str,
        per_page: u32,
        page: u32,
    ) -> Result<Vec<ImageResult>, ProviderError> {
        session.http()?;

        if self.fail {
            return Err(self.injected_error());
        }

        let offset = (page.saturating_sub(1)) * per_page;
        Ok((0..per_page)
            .map(|n| self.synthesize(&format!("{}", offset + n + 1), query))
            .collect())
    }

    async fn get_details(
        &self,
        session: &Session,
        native_id: &str,
    ) -> Result<Option<ImageResult>, ProviderError> {
        session.http()?;

        if self.fail {
            return Err(self.injected_error());
        }
        if native_id == "missing" {
            return Ok(None);
        }
        Ok(Some(self.synthesize(native_id, "mock")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TransportOptions;

    #[tokio::test]
    async fn search_produces_per_page_results() {
        let provider = MockProvider::new("pexels", "Pexels");
        let session = Session::open(&TransportOptions::default()).unwrap();

        let results = provider.search(&session, "coffee", 5, 1).await.unwrap();
        assert_eq!(results.len(), 5);
        assert!(results.iter().all(|r| r.id.starts_with("pexels_")));
        assert_eq!(results[0].source, "Pexels");
    }

    #[tokio::test]
    async fn closed_session_is_rejected() {
        let provider = MockProvider::new("pexels", "Pexels");
        let mut session = Session::open(&TransportOptions::default()).unwrap();
        session.close();

        let result = provider.search(&session, "coffee", 5, 1).await;
        assert!(matches!(result, Err(ProviderError::SessionNotOpen)));
    }

    #[tokio::test]
    async fn injected_failure_surfaces_as_error() {
        let provider = MockProvider::new("pexels", "Pexels").with_failure();
        let session = Session::open(&TransportOptions::default()).unwrap();

        assert!(provider.search(&session, "coffee", 5, 1).await.is_err());
        assert!(provider.get_details(&session, "1").await.is_err());
    }
}
