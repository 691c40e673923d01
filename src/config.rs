//! Explicit configuration for the manager and its transport.

use std::collections::HashMap;
use std::env;
use std::time::Duration;

/// Configuration consumed by
/// [`StockImageManager::from_config`](crate::manager::StockImageManager::from_config).
///
/// Each credential that is present registers the matching provider; an
/// absent credential simply leaves that provider out of the registry.
#[derive(Debug, Clone, Default)]
pub struct StockyConfig {
    /// Pexels API key. `None` leaves Pexels unregistered.
    pub pexels_api_key: Option<String>,

    /// Unsplash access key. `None` leaves Unsplash unregistered.
    pub unsplash_access_key: Option<String>,

    /// Default attribution policy, overridable per call.
    pub attribution_enabled: bool,

    /// Transport configuration applied to every provider session.
    pub transport: TransportOptions,
}

impl StockyConfig {
    /// Read configuration from the environment: `PEXELS_API_KEY`,
    /// `UNSPLASH_ACCESS_KEY` and `ENABLE_ATTRIBUTION_LINKS`.
    ///
    /// Empty credential values count as absent.
    pub fn from_env() -> Self {
        Self {
            pexels_api_key: env::var("PEXELS_API_KEY").ok().filter(|k| !k.is_empty()),
            unsplash_access_key: env::var("UNSPLASH_ACCESS_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            attribution_enabled: env::var("ENABLE_ATTRIBUTION_LINKS")
                .map(|v| v.to_lowercase() == "true")
                .unwrap_or(false),
            transport: TransportOptions::default(),
        }
    }
}

/// Transport configuration applied when a session's HTTP client is built.
#[derive(Debug, Clone, Default)]
pub struct TransportOptions {
    /// Request timeout. If `None`, the client default is used.
    pub timeout: Option<Duration>,

    /// HTTP proxy URL.
    pub proxy: Option<String>,

    /// Additional HTTP headers to send with every request.
    pub headers: Option<HashMap<String, String>>,
}

impl TransportOptions {
    /// Create new default transport options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timeout.
    pub fn with_timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the proxy.
    pub fn with_proxy(mut self, proxy_url: String) -> Self {
        self.proxy = Some(proxy_url);
        self
    }

    /// Add a header.
    pub fn with_header(mut self, key: String, value: String) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(key, value);
        self
    }
}
