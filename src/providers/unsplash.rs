//! Unsplash API provider implementation.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;

use crate::http::{ResponseExt, Session};
use crate::model::ImageResult;
use crate::provider::{ProviderError, StockImageProvider};

const BASE_URL: &str = "https://api.unsplash.com";
const LICENSE: &str = "Free to use under Unsplash License";

/// Provider for the Unsplash API.
///
/// Authenticates with an `Authorization: Client-ID {key}` header. Keys are
/// free at <https://unsplash.com/developers>.
#[derive(Debug, Clone)]
pub struct UnsplashProvider {
    api_key: String,
}

/// Which image resolution to prefer when mapping a record.
///
/// Search results use the `regular`/`small` URLs; the detail view upgrades
/// to `full`/`regular`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    Search,
    Detail,
}

impl UnsplashProvider {
    /// Registry key and id prefix.
    pub const NAME: &'static str = "unsplash";

    /// Create a provider. Fails when the access key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ProviderError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ProviderError::MissingCredential {
                provider: "Unsplash",
                env_var: "UNSPLASH_ACCESS_KEY",
            });
        }
        Ok(Self { api_key })
    }

    fn auth_header(&self) -> String {
        format!("Client-ID {}", self.api_key)
    }

    fn map_photo(photo: UnsplashPhoto, resolution: Resolution) -> ImageResult {
        let UnsplashPhoto {
            id,
            width,
            height,
            description,
            alt_description,
            urls,
            user,
            tags,
        } = photo;

        let description = description.filter(|d| !d.is_empty());
        let alt_description = alt_description.filter(|d| !d.is_empty());

        // Fallback chain: description, then alt text, then photographer.
        let title = description
            .clone()
            .or_else(|| alt_description.clone())
            .unwrap_or_else(|| format!("Photo by {}", user.name));

        let (url, thumbnail, description) = match resolution {
            Resolution::Search => (urls.regular, urls.small, alt_description),
            Resolution::Detail => (
                urls.full.unwrap_or_else(|| urls.regular.clone()),
                urls.regular,
                description,
            ),
        };

        ImageResult {
            id: ImageResult::prefixed_id(Self::NAME, &id),
            title,
            description,
            url,
            thumbnail,
            width,
            height,
            photographer: user.name,
            photographer_url: user.links.html,
            source: "Unsplash".to_string(),
            license: LICENSE.to_string(),
            attribution_url: Some(format!("https://unsplash.com/photos/{}", id)),
            tags: tags.into_iter().map(|t| t.title).collect(),
        }
    }
}

#[async_trait]
impl StockImageProvider for UnsplashProvider {
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
        let url = format!("{}/search/photos", BASE_URL);

        let response = session
            .http()?
            .get(&url)
            .header(AUTHORIZATION, self.auth_header())
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

        let data: UnsplashSearchResponse = response.json_logged().await?;
        Ok(data
            .results
            .into_iter()
            .map(|photo| Self::map_photo(photo, Resolution::Search))
            .collect())
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
            .header(AUTHORIZATION, self.auth_header())
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

        let photo: UnsplashPhoto = response.json_logged().await?;
        Ok(Some(Self::map_photo(photo, Resolution::Detail)))
    }
}

// --- Wire types ---

#[derive(Debug, Deserialize)]
struct UnsplashSearchResponse {
    #[serde(default)]
    results: Vec<UnsplashPhoto>,
}

#[derive(Debug, Deserialize)]
struct UnsplashPhoto {
    id: String,
    width: u32,
    height: u32,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    alt_description: Option<String>,
    urls: UnsplashUrls,
    user: UnsplashUser,
    #[serde(default)]
    tags: Vec<UnsplashTag>,
}

#[derive(Debug, Deserialize)]
struct UnsplashUrls {
    #[serde(default)]
    full: Option<String>,
    regular: String,
    small: String,
}

#[derive(Debug, Deserialize)]
struct UnsplashUser {
    name: String,
    links: UnsplashUserLinks,
}

#[derive(Debug, Deserialize)]
struct UnsplashUserLinks {
    #[serde(default)]
    html: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UnsplashTag {
    title: String,
}
