//! Normalized image schema shared by all providers.

use serde::{Deserialize, Serialize};

/// A single normalized image search result.
///
/// Every provider adapter maps exactly one upstream API record into this
/// shape. Instances are immutable after construction except for the
/// manager's attribution-redaction pass, which may clear
/// [`attribution_url`](ImageResult::attribution_url).
///
/// `Option` fields serialize as `null` rather than being skipped, so a
/// redacted `attribution_url` is always visible in the output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageResult {
    /// Provider-prefixed unique id in the form `{provider}_{nativeId}`,
    /// e.g. `pexels_12345`.
    pub id: String,

    /// Display title; each provider defines its own fallback chain.
    pub title: String,

    /// Longer description when the upstream API supplies one.
    pub description: Option<String>,

    /// Full-size image URL.
    pub url: String,

    /// Preview-size image URL.
    pub thumbnail: String,

    pub width: u32,
    pub height: u32,

    pub photographer: String,
    pub photographer_url: Option<String>,

    /// Human-readable provider name, e.g. `"Pexels"`.
    pub source: String,

    /// Static per-provider license text.
    pub license: String,

    /// Link for crediting the image. Cleared to `null` when the effective
    /// attribution policy is disabled.
    pub attribution_url: Option<String>,

    /// Keywords reported by the upstream API. Never null; defaults to empty.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ImageResult {
    /// Compose a provider-prefixed id from a provider name and the
    /// provider's native id.
    pub fn prefixed_id(provider: &str, native_id: impl std::fmt::Display) -> String {
        format!("{}_{}", provider, native_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixed_id_concatenates_with_underscore() {
        assert_eq!(ImageResult::prefixed_id("pexels", 12345), "pexels_12345");
        assert_eq!(ImageResult::prefixed_id("unsplash", "abc-123"), "unsplash_abc-123");
    }

    #[test]
    fn serializes_cleared_attribution_as_null() {
        let result = ImageResult {
            id: "pexels_1".to_string(),
            title: "A photo".to_string(),
            description: None,
            url: "https://example.com/large.jpg".to_string(),
            thumbnail: "https://example.com/medium.jpg".to_string(),
            width: 1920,
            height: 1080,
            photographer: "Jane".to_string(),
            photographer_url: None,
            source: "Pexels".to_string(),
            license: "Free to use, attribution appreciated".to_string(),
            attribution_url: None,
            tags: Vec::new(),
        };

        let value = serde_json::to_value(&result).unwrap();
        assert!(value.get("attribution_url").unwrap().is_null());
        assert_eq!(value.get("tags").unwrap().as_array().unwrap().len(), 0);
    }
}
