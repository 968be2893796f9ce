//! MCP server surface using the official rmcp SDK.
//!
//! Advertises a single tool, `searchLegifrance`, and serves the bundled
//! API notes as read-only resources. All domain failures are mapped to
//! internal protocol errors at this boundary; diagnostics stay on the
//! tracing side-channel.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    service::RequestContext,
    tool, tool_handler, tool_router,
};
use rust_embed::RustEmbed;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::error::Error;
use crate::search::SearchClient;

/// Bundled notes on the Legifrance search API.
///
/// Served for documentation only; the dispatch logic never consults them
/// since the search shape is fixed in code.
#[derive(RustEmbed)]
#[folder = "src/notes/"]
struct ApiNotes;

/// Input for the searchLegifrance tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchInput {
    /// Search query
    pub query: String,
}

/// The Legifrance MCP server.
#[derive(Clone)]
pub struct LegifranceServer {
    search: SearchClient,
    tool_router: ToolRouter<LegifranceServer>,
}

#[tool_router]
impl LegifranceServer {
    pub fn new(search: SearchClient) -> Self {
        Self {
            search,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(name = "searchLegifrance", description = "Search Legifrance documents")]
    async fn search_legifrance(
        &self,
        Parameters(input): Parameters<SearchInput>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(query = %input.query, "received searchLegifrance call");

        let body = self
            .search
            .search(&input.query)
            .await
            .map_err(internal_error)?;

        Ok(CallToolResult::success(vec![Content::text(body)]))
    }

    fn notes_resources() -> Vec<Resource> {
        ApiNotes::iter()
            .filter_map(|path| {
                let file = ApiNotes::get(&path)?;
                Some(Resource {
                    raw: RawResource {
                        uri: path.to_string(),
                        name: path.to_string(),
                        description: Some("Notes on the Legifrance search API".into()),
                        mime_type: Some("text/markdown".into()),
                        size: Some(file.data.len() as u32),
                        title: None,
                        icons: None,
                    },
                    annotations: None,
                })
            })
            .collect()
    }
}

/// Map a domain error to the protocol's internal-error shape.
///
/// The caller only sees a stable message; status codes and response
/// bodies have already been logged where the failure occurred.
fn internal_error(error: Error) -> McpError {
    McpError::internal_error(
        "Failed to call Legifrance API",
        Some(serde_json::json!({ "error": error.to_string() })),
    )
}

#[tool_handler]
impl ServerHandler for LegifranceServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: "legifrance-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "This server searches Legifrance, the French legal database. \
                 Use 'searchLegifrance' with a free-text query to retrieve the \
                 ten most recent matching case-law documents."
                    .into(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            resources: Self::notes_resources(),
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let file = ApiNotes::get(&request.uri).ok_or_else(|| {
            McpError::resource_not_found(format!("Resource not found: {}", request.uri), None)
        })?;

        let text = String::from_utf8(file.data.into_owned())
            .map_err(|_| McpError::internal_error("Resource is not valid UTF-8", None))?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text, request.uri)],
        })
    }
}
