//! Error types for the Legifrance MCP server.

use thiserror::Error;

/// Result type alias for Legifrance operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to the Legifrance API
#[derive(Debug, Error)]
pub enum Error {
    /// A required environment variable is unset or empty
    #[error("missing required environment variable {0}")]
    MissingEnv(&'static str),
    /// HTTP transport failure (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// OAuth token endpoint rejected the exchange
    #[error("OAuth token request failed with status {status}")]
    Auth { status: u16, body: String },
    /// OAuth token endpoint answered 2xx but without an access token
    #[error("OAuth token response did not contain an access token")]
    MissingToken,
    /// Search endpoint returned a non-200 status
    #[error("Legifrance API returned status {status}")]
    Api { status: u16, body: String },
}
