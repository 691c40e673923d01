//! Pexels API provider implementation.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;

use crate::http::{ResponseExt, Session};
use crate::model::ImageResult;
use crate::provider::{ProviderError, StockImageProvider};

const BASE_URL: &str = "https://api.pexels.com/v1";
const LICENSE: &str = "Free to use, attribution appreciated";

/// Provider for the Pexels image search API.
///
/// Authenticates with a bare `Authorization: {key}` header. Keys are free
/// at <https://www.pexels.com/api/>.
#[derive(Debug, Clone)]
pub struct PexelsProvider {
    api_key: String,
}

impl PexelsProvider {
    /// Registry key and id prefix.
    pub const NAME: &'static str = "pexels";

    /// Create a provider. Fails when the API key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ProviderError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ProviderError::MissingCredential {
                provider: "Pexels",
                env_var: "PEXELS_API_KEY",
            });
        }
        Ok(Self { api_key })
    }

    fn map_photo(photo: PexelsPhoto) -> ImageResult {
        let PexelsPhoto {
            id,
            width,
            height,
            photographer,
            photographer_url,
            alt,
            src,
        } = photo;

        let alt = alt.filter(|a| !a.is_empty());

        ImageResult {
            id: ImageResult::prefixed_id(Self::NAME, id),
            title: alt
                .clone()
                .unwrap_or_else(|| format!("Photo by {}", photographer)),
            description: alt.clone(),
            url: src.large,
            thumbnail: src.medium,
            width,
            height,
            photographer,
            photographer_url,
            source: "Pexels".to_string(),
            license: LICENSE.to_string(),
            attribution_url: Some(format!("https://www.pexels.com/photo/{}", id)),
            tags: alt.map(|a| vec![a.to_lowercase()]).unwrap_or_default(),
        }
    }
}

#[async_trait]
impl StockImageProvider for PexelsProvider {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn search(
        &self,
        session: &Session,
        query: &str,
        per_page: u32,
        page: u32,
    ) -> Result<Vec<ImageResult>, ProviderError> {
        let url = format!("{}/search", BASE_URL);

        let response = session
            .http()?
            .get(&url)
            .header(AUTHORIZATION, &self.api_key)
            .query(&[
                ("query", query.to_string()),
                ("per_page", per_page.to_string()),
                ("page", page.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text_logged().await.unwrap_or_default();
            return Err(ProviderError::Status { status, body });
        }

        let data: PexelsSearchResponse = response.json_logged().await?;
        Ok(data.photos.into_iter().map(Self::map_photo).collect())
    }

    async fn get_details(
        &self,
        session: &Session,
        native_id: &str,
    ) -> Result<Option<ImageResult>, ProviderError> {
        let url = format!("{}/photos/{}", BASE_URL, native_id);

        let response = session
            .http()?
            .get(&url)
            .header(AUTHORIZATION, &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text_logged().await.unwrap_or_default();
            return Err(ProviderError::Status { status, body });
        }

        let photo: PexelsPhoto = response.json_logged().await?;
        Ok(Some(Self::map_photo(photo)))
    }
}

// --- Wire types ---

#[derive(Debug, Deserialize)]
struct PexelsSearchResponse {
    #[serde(default)]
    photos: Vec<PexelsPhoto>,
}

#[derive(Debug, Deserialize)]
struct PexelsPhoto {
    id: u64,
    width: u32,
    height: u32,
    photographer: String,
    #[serde(default)]
    photographer_url: Option<String>,
    #[serde(default)]
    alt: Option<String>,
    src: PexelsSrc,
}

#[derive(Debug, Deserialize)]
struct PexelsSrc {
    large: String,
    medium: String,
}
