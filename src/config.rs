//! Environment-backed configuration.
//!
//! All credentials are read once at startup; the resulting [`Config`] is
//! immutable for the life of the process and shared by reference.

use crate::error::{Error, Result};

pub const ENV_CLIENT_ID: &str = "LEGIFRANCE_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "LEGIFRANCE_CLIENT_SECRET";
pub const ENV_API_KEY: &str = "LEGIFRANCE_API_KEY";
pub const ENV_OAUTH_SECRET: &str = "LEGIFRANCE_OAUTH_SECRET";
pub const ENV_TOKEN_URL: &str = "OAUTH_TOKEN_URL";
pub const ENV_API_URL: &str = "LEGIFRANCE_API_URL";

/// Credentials and endpoints for the Legifrance API.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub api_key: String,
    /// Required at startup like the other credentials, but not consulted
    /// by the request path.
    pub oauth_secret: String,
    pub token_url: String,
    pub api_url: String,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Fails with the name of the first missing variable; an empty value
    /// counts as missing.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary lookup function.
    ///
    /// Separated from [`Config::from_env`] so tests never touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &'static str| -> Result<String> {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or(Error::MissingEnv(name))
        };

        Ok(Self {
            client_id: get(ENV_CLIENT_ID)?,
            client_secret: get(ENV_CLIENT_SECRET)?,
            api_key: get(ENV_API_KEY)?,
            oauth_secret: get(ENV_OAUTH_SECRET)?,
            token_url: get(ENV_TOKEN_URL)?,
            api_url: get(ENV_API_URL)?,
        })
    }

    /// URL of the search endpoint: `<api_url>/search`.
    pub fn search_url(&self) -> String {
        format!("{}/search", self.api_url.trim_end_matches('/'))
    }
}
