//! # stocky - Stock Image Aggregation MCP Server
//!
//! A small, pragmatic library aggregating royalty-free stock image search
//! across multiple providers (Pexels, Unsplash) behind one uniform query
//! interface, exposed over the Model Context Protocol.
//!
//! ## Architecture
//!
//! 1. **Providers** translate one upstream API's wire format into the
//!    normalized [`ImageResult`](model::ImageResult) schema.
//! 2. **Sessions** scope one HTTP client to one batch of provider calls.
//! 3. The **Manager** owns the provider registry, fans a query out across
//!    providers concurrently, merges the results, and applies uniform
//!    policy (attribution redaction, id-based routing).
//! 4. The **MCP layer** exposes the manager as `search_stock_images` and
//!    `get_image_details` tools plus a static help resource.
//!
//! ### Core Types
//!
//! - **`StockImageProvider`**: trait implemented by each provider adapter.
//! - **`ImageResult`**: the normalized schema every provider produces.
//! - **`StockImageManager`**: aggregation and policy across providers.
//! - **`StockyConfig`**: explicit configuration (credentials, attribution
//!   default, transport), with an environment-sourced constructor.
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use stocky::config::StockyConfig;
//! use stocky::manager::{SearchRequest, StockImageManager};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let manager = StockImageManager::from_config(StockyConfig::from_env());
//!
//!     let response = manager
//!         .search(SearchRequest::new("sunset beach").with_paging(10, 1))
//!         .await?;
//!
//!     for (provider, images) in &response.results {
//!         println!("{}: {} results", provider, images.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod http;
pub mod manager;
pub mod mcp;
pub mod model;
pub mod provider;
pub mod providers;

pub use config::{StockyConfig, TransportOptions};
pub use http::Session;
pub use manager::{ManagerError, SearchRequest, SearchResponse, SortOrder, StockImageManager};
pub use mcp::StockyServer;
pub use model::ImageResult;
pub use provider::{ProviderError, StockImageProvider};

// Re-export rmcp for convenience
pub use rmcp;
