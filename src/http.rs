//! Scoped HTTP sessions and request utilities for provider calls.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;

use crate::config::TransportOptions;
use crate::provider::ProviderError;

/// A scoped HTTP session backing one batch of provider calls.
///
/// The manager opens a fresh session per provider per search, so sessions
/// are never shared across concurrent calls. The underlying client is
/// released when the session is dropped or explicitly closed; provider
/// methods borrow the session and fail with
/// [`ProviderError::SessionNotOpen`] once it has been closed.
#[derive(Debug)]
pub struct Session {
    http: Option<Client>,
}

impl Session {
    /// Open a session, building an HTTP client from transport options.
    pub fn open(transport: &TransportOptions) -> Result<Self, ProviderError> {
        let http = build_http_client(transport)?;
        Ok(Self { http: Some(http) })
    }

    /// Release the underlying HTTP client. Subsequent provider calls
    /// through this session fail with [`ProviderError::SessionNotOpen`].
    pub fn close(&mut self) {
        self.http = None;
    }

    /// Whether the session still holds a client.
    pub fn is_open(&self) -> bool {
        self.http.is_some()
    }

    /// Borrow the underlying client.
    pub(crate) fn http(&self) -> Result<&Client, ProviderError> {
        self.http.as_ref().ok_or(ProviderError::SessionNotOpen)
    }
}

/// Build a configured HTTP client from transport options.
pub fn build_http_client(transport: &TransportOptions) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder();

    if let Some(t) = transport.timeout {
        builder = builder.timeout(t);
    }
    if let Some(proxy_url) = &transport.proxy {
        if let Ok(p) = reqwest::Proxy::all(proxy_url) {
            builder = builder.proxy(p);
        }
    }
    if let Some(headers) = &transport.headers {
        let mut map = HeaderMap::new();
        for (key, value) in headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::try_from(key.as_str()),
                HeaderValue::from_str(value),
            ) {
                map.insert(name, value);
            }
        }
        builder = builder.default_headers(map);
    }

    builder.build()
}

/// Extension trait for Response that logs the response body.
#[async_trait::async_trait]
pub trait ResponseExt {
    /// Get response text and log it. Consumes the response.
    async fn text_logged(self) -> Result<String, reqwest::Error>;

    /// Parse response as JSON and log it. Consumes the response.
    async fn json_logged<T: serde::de::DeserializeOwned>(self) -> Result<T, ProviderError>;
}

#[async_trait::async_trait]
impl ResponseExt for reqwest::Response {
    async fn text_logged(self) -> Result<String, reqwest::Error> {
        let text = self.text().await?;
        tracing::debug!("API response ({} bytes):\n{}", text.len(), text);
        Ok(text)
    }

    async fn json_logged<T: serde::de::DeserializeOwned>(self) -> Result<T, ProviderError> {
        let bytes = self.bytes().await?;

        if let Ok(text) = std::str::from_utf8(&bytes) {
            tracing::debug!("API response ({} bytes):\n{}", text.len(), text);
        }

        serde_json::from_slice(&bytes).map_err(ProviderError::from)
    }
}
