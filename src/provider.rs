//! Provider capability contract and error types.

use async_trait::async_trait;
use thiserror::Error;

use crate::http::Session;
use crate::model::ImageResult;

/// Errors that can occur while constructing or calling a provider.
///
/// Upstream request failures (`Http`, `Status`, `Parse`) never reach the
/// caller of the aggregation manager: the manager logs them and degrades to
/// an empty result list or a not-found answer.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Provider constructed without a credential. Fatal to that provider's
    /// construction, not to the process.
    #[error("{provider} API key is missing; set the {env_var} environment variable")]
    MissingCredential {
        provider: &'static str,
        env_var: &'static str,
    },

    /// Provider method invoked on a session that has been closed.
    #[error("provider session is not open")]
    SessionNotOpen,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Uniform contract over heterogeneous stock-image APIs.
///
/// Each implementation translates one upstream wire format into
/// [`ImageResult`]. Network operations borrow a [`Session`] opened by the
/// caller; the session scopes the HTTP client to a single batch of calls
/// and is released when it goes out of scope.
///
/// New providers are added as new implementations; callers only ever see
/// the trait.
#[async_trait]
pub trait StockImageProvider: Send + Sync {
    /// Registry key, also used as the id prefix, e.g. `"pexels"`.
    fn name(&self) -> &'static str;

    /// Search for images matching `query`. Result order matches the
    /// upstream API's ordering.
    async fn search(
        &self,
        session: &Session,
        query: &str,
        per_page: u32,
        page: u32,
    ) -> Result<Vec<ImageResult>, ProviderError>;

    /// Look up a single image by its provider-native id (prefix already
    /// stripped). `Ok(None)` means the provider does not know the id.
    async fn get_details(
        &self,
        session: &Session,
        native_id: &str,
    ) -> Result<Option<ImageResult>, ProviderError>;
}
