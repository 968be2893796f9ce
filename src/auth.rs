//! OAuth2 client-credentials token acquisition and caching.
//!
//! The Legifrance API hands out bearer tokens through a client-credentials
//! exchange. Exchanges are rate-limited by the issuer, so the first
//! successful token is cached for the life of the process and reused for
//! every subsequent call. There is no expiry tracking and no refresh.

use std::sync::{Arc, Mutex};

use serde::Deserialize;

use crate::config::Config;
use crate::error::{Error, Result};

const OAUTH_SCOPE: &str = "openid";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// Produces bearer tokens for the Legifrance API.
///
/// Cheap to clone; clones share the same token cache.
#[derive(Clone)]
pub struct TokenProvider {
    http: reqwest::Client,
    config: Arc<Config>,
    cached: Arc<Mutex<Option<String>>>,
}

impl TokenProvider {
    pub fn new(http: reqwest::Client, config: Arc<Config>) -> Self {
        Self {
            http,
            config,
            cached: Arc::new(Mutex::new(None)),
        }
    }

    /// Creates a provider whose cache is already populated (for tests).
    pub fn with_cached_token(
        http: reqwest::Client,
        config: Arc<Config>,
        token: impl Into<String>,
    ) -> Self {
        let provider = Self::new(http, config);
        *provider.cached.lock().unwrap() = Some(token.into());
        provider
    }

    /// Returns the cached token, or performs the OAuth exchange and caches
    /// the result.
    ///
    /// A failed exchange leaves the cache empty, so the next call retries.
    /// Concurrent first calls may both perform the exchange; the duplicate
    /// work is harmless and the last write wins.
    pub async fn token(&self) -> Result<String> {
        if let Some(token) = self.cached.lock().unwrap().clone() {
            return Ok(token);
        }

        let token = self.exchange().await?;
        *self.cached.lock().unwrap() = Some(token.clone());
        Ok(token)
    }

    async fn exchange(&self) -> Result<String> {
        tracing::debug!(url = %self.config.token_url, "requesting OAuth token");

        let response = self
            .http
            .post(&self.config.token_url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .header("X-Api-Key", &self.config.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[("grant_type", "client_credentials"), ("scope", OAUTH_SCOPE)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), %body, "OAuth token request failed");
            return Err(Error::Auth {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let token = extract_token(&body)?;
        tracing::info!("obtained OAuth access token");
        Ok(token)
    }
}

/// Pull the access token out of an OAuth token response body.
fn extract_token(body: &str) -> Result<String> {
    serde_json::from_str::<TokenResponse>(body)
        .ok()
        .and_then(|payload| payload.access_token)
        .ok_or(Error::MissingToken)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    /// Endpoints on the discard port: any exchange attempt fails fast.
    fn unroutable_config() -> Arc<Config> {
        Arc::new(Config {
            client_id: "client-id".into(),
            client_secret: "client-secret".into(),
            api_key: "api-key".into(),
            oauth_secret: "oauth-secret".into(),
            token_url: "http://127.0.0.1:9/token".into(),
            api_url: "http://127.0.0.1:9/api".into(),
        })
    }

    #[tokio::test]
    async fn cached_token_short_circuits_the_exchange() {
        let provider = TokenProvider::with_cached_token(
            reqwest::Client::new(),
            unroutable_config(),
            "cached-token",
        );

        // The token endpoint is unreachable, so this only succeeds if the
        // cache is consulted first.
        let token = provider.token().await.unwrap();
        assert_eq!(token, "cached-token");
    }

    #[tokio::test]
    async fn failed_exchange_leaves_cache_empty() {
        let provider = TokenProvider::new(reqwest::Client::new(), unroutable_config());

        let err = provider.token().await.unwrap_err();
        assert_matches!(err, Error::Http(_));
        assert!(provider.cached.lock().unwrap().is_none());
    }

    #[test]
    fn extract_token_reads_access_token() {
        let token =
            extract_token(r#"{"access_token":"abc123","token_type":"Bearer"}"#).unwrap();
        assert_eq!(token, "abc123");
    }

    #[test]
    fn response_without_access_token_is_rejected() {
        let err = extract_token(r#"{"token_type":"Bearer"}"#).unwrap_err();
        assert_matches!(err, Error::MissingToken);
    }

    #[test]
    fn non_json_response_is_rejected() {
        let err = extract_token("<html>oops</html>").unwrap_err();
        assert_matches!(err, Error::MissingToken);
    }
}
