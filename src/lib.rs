//! MCP server exposing the Legifrance legal-document search API.
//!
//! One tool (`searchLegifrance`), one OAuth2 client-credentials token
//! cached for the life of the process, one downstream REST call per
//! invocation. Configuration comes from the environment and is validated
//! once at startup.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use rmcp::ServiceExt;

pub mod auth;
pub mod config;
pub mod error;
pub mod search;
pub mod server;

use crate::auth::TokenProvider;
use crate::config::Config;
use crate::search::SearchClient;
use crate::server::LegifranceServer;

/// HTTP request timeout in seconds.
const HTTP_TIMEOUT_SECS: u64 = 30;

/// Load configuration, authenticate, and serve MCP over stdio until the
/// client disconnects.
pub async fn run() -> Result<()> {
    let config = Arc::new(
        Config::from_env().context("Legifrance configuration is incomplete")?,
    );

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .build()
        .context("Failed to create HTTP client")?;

    let tokens = TokenProvider::new(http.clone(), config.clone());

    // Probe the OAuth endpoint before accepting requests; this also warms
    // the token cache so the first tool call skips the exchange.
    tokens
        .token()
        .await
        .context("Failed to authenticate with the Legifrance API")?;
    tracing::info!("authenticated with the Legifrance API");

    let search = SearchClient::new(http, config, tokens);
    let server = LegifranceServer::new(search);

    tracing::info!("Legifrance MCP server running on stdio");
    let service = server.serve(rmcp::transport::stdio()).await?;
    service.waiting().await?;
    Ok(())
}
