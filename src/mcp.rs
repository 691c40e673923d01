//! MCP service exposing the aggregation manager as tools and resources.

use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        AnnotateAble, CallToolResult, Content, ErrorData as McpError, ListResourcesResult,
        PaginatedRequestParam, RawResource, ReadResourceRequestParam, ReadResourceResult,
        ResourceContents, ServerCapabilities, ServerInfo,
    },
    schemars,
    service::{RequestContext, RoleServer},
    tool, tool_handler, tool_router, ServerHandler,
};
use serde::Deserialize;

use crate::manager::{SearchRequest, SortOrder, StockImageManager};

/// Hard cap on results per page, applied before any provider is called.
pub const PER_PAGE_LIMIT: u32 = 50;

const HELP_URI: &str = "stock-images://help";

const HELP_TEXT: &str = r#"# Stocky MCP Server Help

Stocky searches royalty-free stock images across multiple providers.

## Available Tools

### search_stock_images
Search for stock images across multiple providers.

Parameters:
- query (required): Your search terms
- providers (optional): List of providers to search, e.g. ["pexels", "unsplash"]
- per_page (optional): Results per page (max 50)
- page (optional): Page number for pagination
- sort_by (optional): Sort results by 'relevant', 'newest' or 'popular'
- include_attribution (optional): Whether to include attribution links

Example:
```
search_stock_images("sunset beach", per_page=10)
```

### get_image_details
Get detailed information about a specific image.

Parameters:
- image_id (required): Image ID in format 'provider_id' (e.g. 'pexels_123456')
- include_attribution (optional): Whether to include attribution links

Example:
```
get_image_details("unsplash_abc123")
```

## Providers

1. **Pexels** - High-quality stock photos
   - API key: PEXELS_API_KEY (https://www.pexels.com/api/)
   - License: Free to use, attribution appreciated

2. **Unsplash** - Beautiful, free images
   - API key: UNSPLASH_ACCESS_KEY (https://unsplash.com/developers)
   - License: Unsplash License

## Setup

Set at least one API key in the environment, then run the server:

```bash
export PEXELS_API_KEY="your_key"
export UNSPLASH_ACCESS_KEY="your_key"
stocky-mcp
```

Set ENABLE_ATTRIBUTION_LINKS=true to include attribution URLs by default.

## Tips

- Use specific search terms for better results
- Check the license information for each image
- Use pagination for browsing large result sets
- Different providers may return different types of images
"#;

/// Parameters for the `search_stock_images` tool.
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct SearchStockImagesParams {
    #[schemars(description = "Search query string")]
    pub query: String,

    #[schemars(
        description = "Providers to search, e.g. [\"pexels\", \"unsplash\"]; defaults to all configured providers"
    )]
    pub providers: Option<Vec<String>>,

    #[schemars(description = "Number of results per page (max 50, default 20)")]
    pub per_page: Option<u32>,

    #[schemars(description = "Page number for pagination (default 1)")]
    pub page: Option<u32>,

    #[schemars(description = "Sort order: 'relevant', 'newest' or 'popular'")]
    pub sort_by: Option<String>,

    #[schemars(
        description = "Whether to include attribution links (defaults to the ENABLE_ATTRIBUTION_LINKS setting)"
    )]
    pub include_attribution: Option<bool>,
}

/// Parameters for the `get_image_details` tool.
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct GetImageDetailsParams {
    #[schemars(description = "Provider-prefixed image ID, e.g. 'pexels_12345'")]
    pub image_id: String,

    #[schemars(
        description = "Whether to include attribution links (defaults to the ENABLE_ATTRIBUTION_LINKS setting)"
    )]
    pub include_attribution: Option<bool>,
}

/// Stocky MCP server.
///
/// Thin shim over [`StockImageManager`]: tool parameters are validated and
/// clamped here, manager errors become `{"error": message}` payloads, and
/// the help resource returns static documentation.
#[derive(Clone)]
pub struct StockyServer {
    tool_router: ToolRouter<Self>,
    manager: Arc<StockImageManager>,
}

#[tool_router]
impl StockyServer {
    pub fn new(manager: Arc<StockImageManager>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            manager,
        }
    }

    #[tool(description = "Search for royalty-free stock images across multiple providers")]
    pub async fn search_stock_images(
        &self,
        Parameters(params): Parameters<SearchStockImagesParams>,
    ) -> Result<CallToolResult, McpError> {
        // Clamp before any provider sees the value.
        let per_page = params.per_page.unwrap_or(20).min(PER_PAGE_LIMIT);
        let page = params.page.unwrap_or(1);
        let sort = params
            .sort_by
            .as_deref()
            .map(SortOrder::from_hint)
            .unwrap_or_default();

        let mut request = SearchRequest::new(params.query)
            .with_paging(per_page, page)
            .with_sort(sort);
        if let Some(providers) = params.providers {
            request = request.with_providers(providers);
        }
        if let Some(include) = params.include_attribution {
            request = request.with_attribution(include);
        }

        let payload = match self.manager.search(request).await {
            Ok(response) => serde_json::to_value(response.into_flattened())
                .map_err(|e| serialize_error("search results", e))?,
            Err(err) => error_payload(&err),
        };

        json_result(&payload)
    }

    #[tool(description = "Get detailed information about a specific image by its provider-prefixed ID")]
    pub async fn get_image_details(
        &self,
        Parameters(params): Parameters<GetImageDetailsParams>,
    ) -> Result<CallToolResult, McpError> {
        let payload = match self
            .manager
            .get_image_details(&params.image_id, params.include_attribution)
            .await
        {
            Ok(image) => {
                serde_json::to_value(image).map_err(|e| serialize_error("image details", e))?
            }
            Err(err) => error_payload(&err),
        };

        json_result(&payload)
    }
}

#[tool_handler]
impl ServerHandler for StockyServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: rmcp::model::Implementation {
                name: "stocky".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            instructions: Some(
                "Search royalty-free stock images from Pexels and Unsplash. \
                 Use search_stock_images to find images and get_image_details \
                 to look one up by its provider-prefixed id. Read \
                 stock-images://help for full usage documentation."
                    .into(),
            ),
            ..Default::default()
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        let mut help = RawResource::new(HELP_URI, "Stocky help");
        help.description = Some("Usage documentation for the stock image tools".to_string());
        help.mime_type = Some("text/markdown".to_string());

        Ok(ListResourcesResult {
            resources: vec![help.no_annotation()],
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        match request.uri.as_str() {
            HELP_URI => Ok(ReadResourceResult {
                contents: vec![ResourceContents::text(HELP_TEXT, HELP_URI)],
            }),
            other => Err(McpError::resource_not_found(
                format!("Unknown resource: {}", other),
                None,
            )),
        }
    }
}

fn error_payload(err: &impl std::fmt::Display) -> serde_json::Value {
    serde_json::json!({ "error": err.to_string() })
}

fn serialize_error(what: &str, err: serde_json::Error) -> McpError {
    McpError::internal_error(format!("Failed to serialize {}: {}", what, err), None)
}

fn json_result(payload: &serde_json::Value) -> Result<CallToolResult, McpError> {
    let json_str =
        serde_json::to_string(payload).map_err(|e| serialize_error("response", e))?;
    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}
