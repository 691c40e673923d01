//! Aggregation manager multiplexing one query across providers.

use futures::future::join_all;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::config::{StockyConfig, TransportOptions};
use crate::http::Session;
use crate::model::ImageResult;
use crate::provider::StockImageProvider;
use crate::providers::{PexelsProvider, UnsplashProvider};

/// Errors surfaced to callers as structured payloads rather than faults.
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error(
        "No image providers are configured. Set at least one API key: \
         PEXELS_API_KEY for Pexels, UNSPLASH_ACCESS_KEY for Unsplash"
    )]
    NoProvidersConfigured,

    #[error("No available providers from: {requested}. Please check your configuration.")]
    NoAvailableProviders { requested: String },

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Image not found")]
    ImageNotFound,
}

/// Sort hint accepted by the search interface.
///
/// Neither upstream API is queried with it; the hint is recorded for
/// callers only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Relevant,
    Newest,
    Popular,
}

impl SortOrder {
    /// Lenient parse of a caller-supplied hint. Unknown values fall back
    /// to relevance.
    pub fn from_hint(hint: &str) -> Self {
        match hint.to_lowercase().as_str() {
            "newest" | "latest" => SortOrder::Newest,
            "popular" => SortOrder::Popular,
            _ => SortOrder::Relevant,
        }
    }
}

/// Parameters for one aggregated search.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,

    /// Provider names to fan out to. `None` means every registered
    /// provider, in registry order.
    pub providers: Option<Vec<String>>,

    pub per_page: u32,
    pub page: u32,

    /// Sort hint; recorded but not forwarded upstream.
    pub sort: SortOrder,

    /// Overrides the configured attribution default when set.
    pub include_attribution: Option<bool>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            providers: None,
            per_page: 20,
            page: 1,
            sort: SortOrder::default(),
            include_attribution: None,
        }
    }

    /// Restrict the fan-out to the named providers.
    pub fn with_providers(mut self, providers: Vec<String>) -> Self {
        self.providers = Some(providers);
        self
    }

    /// Set page size and page number.
    pub fn with_paging(mut self, per_page: u32, page: u32) -> Self {
        self.per_page = per_page;
        self.page = page;
        self
    }

    /// Set the sort hint.
    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Override the configured attribution default.
    pub fn with_attribution(mut self, include: bool) -> Self {
        self.include_attribution = Some(include);
        self
    }
}

/// Aggregated search response keyed by provider name.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub page: u32,
    pub per_page: u32,

    /// Provider names actually queried, in fan-out order.
    pub providers: Vec<String>,

    /// Per-provider result lists. Serializes as a map whose keys preserve
    /// fan-out order.
    #[serde(serialize_with = "serialize_results")]
    pub results: Vec<(String, Vec<ImageResult>)>,
}

impl SearchResponse {
    /// Results for one provider, if it was part of the fan-out.
    pub fn provider_results(&self, name: &str) -> Option<&[ImageResult]> {
        self.results
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, r)| r.as_slice())
    }

    /// All results flattened in provider order, then upstream order.
    pub fn into_flattened(self) -> Vec<ImageResult> {
        self.results.into_iter().flat_map(|(_, r)| r).collect()
    }
}

fn serialize_results<S: Serializer>(
    results: &[(String, Vec<ImageResult>)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(results.len()))?;
    for (name, images) in results {
        map.serialize_entry(name, images)?;
    }
    map.end()
}

/// Owns the provider registry and applies uniform policy (fan-out,
/// attribution redaction, id-based routing) across providers.
///
/// The registry is built once at construction and read-only afterwards, so
/// concurrent searches share the manager freely. Each search opens its own
/// [`Session`] per provider; sessions are never shared across calls.
pub struct StockImageManager {
    providers: Vec<Box<dyn StockImageProvider>>,
    attribution_enabled: bool,
    transport: TransportOptions,
}

impl StockImageManager {
    /// Build a manager from configuration, registering a provider for each
    /// credential present. Zero configured providers is valid; searches
    /// then report [`ManagerError::NoProvidersConfigured`].
    pub fn from_config(config: StockyConfig) -> Self {
        let mut providers: Vec<Box<dyn StockImageProvider>> = Vec::new();

        if let Some(key) = config.pexels_api_key {
            match PexelsProvider::new(key) {
                Ok(provider) => providers.push(Box::new(provider)),
                Err(err) => tracing::warn!("Skipping Pexels provider: {}", err),
            }
        }
        if let Some(key) = config.unsplash_access_key {
            match UnsplashProvider::new(key) {
                Ok(provider) => providers.push(Box::new(provider)),
                Err(err) => tracing::warn!("Skipping Unsplash provider: {}", err),
            }
        }

        tracing::info!(
            "Configured providers: [{}]",
            providers
                .iter()
                .map(|p| p.name())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Self {
            providers,
            attribution_enabled: config.attribution_enabled,
            transport: config.transport,
        }
    }

    /// Build a manager over an explicit provider set. Used by tests and
    /// embedders that construct providers themselves.
    pub fn with_providers(
        providers: Vec<Box<dyn StockImageProvider>>,
        attribution_enabled: bool,
    ) -> Self {
        Self {
            providers,
            attribution_enabled,
            transport: TransportOptions::default(),
        }
    }

    /// Registered provider names in registry order.
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    fn provider(&self, name: &str) -> Option<&dyn StockImageProvider> {
        self.providers
            .iter()
            .find(|p| p.name() == name)
            .map(|p| p.as_ref())
    }

    /// Search for images across the selected providers concurrently.
    ///
    /// Unknown provider names are dropped from the fan-out; a provider
    /// whose call fails contributes an empty list (the error is logged,
    /// not surfaced), so the aggregate is at worst partial, never a
    /// wholesale failure.
    pub async fn search(&self, request: SearchRequest) -> Result<SearchResponse, ManagerError> {
        if self.providers.is_empty() {
            return Err(ManagerError::NoProvidersConfigured);
        }

        let requested: Vec<String> = match &request.providers {
            Some(names) => names.clone(),
            None => self
                .provider_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
        };

        let selected: Vec<&dyn StockImageProvider> = requested
            .iter()
            .filter_map(|name| self.provider(name))
            .collect();

        if selected.is_empty() {
            return Err(ManagerError::NoAvailableProviders {
                requested: requested.join(", "),
            });
        }

        let show_attribution = request
            .include_attribution
            .unwrap_or(self.attribution_enabled);

        let query = request.query.as_str();
        let (per_page, page) = (request.per_page, request.page);

        let calls = selected.into_iter().map(|provider| async move {
            let name = provider.name().to_string();
            let results = self
                .call_search(provider, query, per_page, page)
                .await;
            (name, results)
        });

        let mut results: Vec<(String, Vec<ImageResult>)> = join_all(calls).await;

        if !show_attribution {
            for (_, images) in &mut results {
                for image in images.iter_mut() {
                    image.attribution_url = None;
                }
            }
        }

        let providers_used = results.iter().map(|(name, _)| name.clone()).collect();

        Ok(SearchResponse {
            query: request.query,
            page: request.page,
            per_page: request.per_page,
            providers: providers_used,
            results,
        })
    }

    /// One provider round trip with its own session scope, degraded to an
    /// empty list on failure.
    async fn call_search(
        &self,
        provider: &dyn StockImageProvider,
        query: &str,
        per_page: u32,
        page: u32,
    ) -> Vec<ImageResult> {
        let session = match Session::open(&self.transport) {
            Ok(session) => session,
            Err(err) => {
                tracing::error!("Error opening session for {}: {}", provider.name(), err);
                return Vec::new();
            }
        };

        match provider.search(&session, query, per_page, page).await {
            Ok(results) => results,
            Err(err) => {
                tracing::error!("Error searching {}: {}", provider.name(), err);
                Vec::new()
            }
        }
    }

    /// Look up one image by its provider-prefixed id.
    ///
    /// The prefix routes the call to the matching provider; lookups the
    /// provider cannot satisfy (including upstream failures, which are
    /// logged) resolve to [`ManagerError::ImageNotFound`].
    pub async fn get_image_details(
        &self,
        image_id: &str,
        include_attribution: Option<bool>,
    ) -> Result<ImageResult, ManagerError> {
        let (prefix, native_id) = image_id
            .split_once('_')
            .ok_or(ManagerError::ImageNotFound)?;

        let provider = self
            .provider(prefix)
            .ok_or_else(|| ManagerError::UnknownProvider(prefix.to_string()))?;

        let show_attribution = include_attribution.unwrap_or(self.attribution_enabled);

        let lookup = match Session::open(&self.transport) {
            Ok(session) => provider.get_details(&session, native_id).await,
            Err(err) => Err(err),
        };

        let mut image = match lookup {
            Ok(Some(image)) => image,
            Ok(None) => return Err(ManagerError::ImageNotFound),
            Err(err) => {
                tracing::error!("Error getting image details from {}: {}", prefix, err);
                return Err(ManagerError::ImageNotFound);
            }
        };

        if !show_attribution {
            image.attribution_url = None;
        }

        Ok(image)
    }
}
