//! Search payload construction and the downstream `/search` call.
//!
//! The query shape is fixed: case-law fund (`JURI`), one page of ten
//! results, newest signature dates first, all words of the caller's query
//! matched anywhere in the document. Only the query text varies per call.
//!
//! The response body is passed through verbatim; no schema is imposed on
//! what the API returns.

use std::sync::Arc;

use serde::Serialize;

use crate::auth::TokenProvider;
use crate::config::Config;
use crate::error::{Error, Result};

const USER_AGENT: &str = concat!("legifrance-mcp/", env!("CARGO_PKG_VERSION"));

/// Wire-shape search request for `POST /search`.
#[derive(Debug, Serialize)]
pub struct SearchRequest {
    fond: &'static str,
    recherche: Recherche,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Recherche {
    page_size: u32,
    page_number: u32,
    sort: &'static str,
    type_pagination: &'static str,
    champs: Vec<Champ>,
    operateur: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Champ {
    type_champ: &'static str,
    operateur: &'static str,
    criteres: Vec<Critere>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Critere {
    type_recherche: &'static str,
    valeur: String,
    operateur: &'static str,
}

impl SearchRequest {
    /// Builds the fixed-shape query document around the caller's text.
    pub fn for_query(query: impl Into<String>) -> Self {
        Self {
            fond: "JURI",
            recherche: Recherche {
                page_size: 10,
                page_number: 1,
                sort: "SIGNATURE_DATE_DESC",
                type_pagination: "DEFAUT",
                champs: vec![Champ {
                    type_champ: "ALL",
                    operateur: "ET",
                    criteres: vec![Critere {
                        type_recherche: "TOUS_LES_MOTS_DANS_UN_CHAMP",
                        valeur: query.into(),
                        operateur: "ET",
                    }],
                }],
                operateur: "ET",
            },
        }
    }
}

/// Issues authenticated search requests against the Legifrance API.
#[derive(Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    config: Arc<Config>,
    tokens: TokenProvider,
}

impl SearchClient {
    pub fn new(http: reqwest::Client, config: Arc<Config>, tokens: TokenProvider) -> Self {
        Self {
            http,
            config,
            tokens,
        }
    }

    /// Runs one search and returns the raw JSON response body.
    ///
    /// Any HTTP status is accepted at the transport layer; a non-200
    /// status becomes [`Error::Api`] with the body kept for diagnostics.
    pub async fn search(&self, query: &str) -> Result<String> {
        let token = self.tokens.token().await?;
        let request = SearchRequest::for_query(query);

        let url = self.config.search_url();
        tracing::debug!(%url, query, "issuing search request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&token)
            .header("X-Api-Key", &self.config.api_key)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != reqwest::StatusCode::OK {
            tracing::error!(status = status.as_u16(), %body, "search request failed");
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use expect_test::expect;

    #[test]
    fn search_payload_matches_wire_shape() {
        let request = SearchRequest::for_query("droit du travail");
        let json = serde_json::to_string_pretty(&request).unwrap();

        expect![[r#"
            {
              "fond": "JURI",
              "recherche": {
                "pageSize": 10,
                "pageNumber": 1,
                "sort": "SIGNATURE_DATE_DESC",
                "typePagination": "DEFAUT",
                "champs": [
                  {
                    "typeChamp": "ALL",
                    "operateur": "ET",
                    "criteres": [
                      {
                        "typeRecherche": "TOUS_LES_MOTS_DANS_UN_CHAMP",
                        "valeur": "droit du travail",
                        "operateur": "ET"
                      }
                    ]
                  }
                ],
                "operateur": "ET"
              }
            }"#]]
        .assert_eq(&json);
    }

    #[tokio::test]
    async fn unreachable_api_surfaces_transport_error() {
        let config = Arc::new(Config {
            client_id: "client-id".into(),
            client_secret: "client-secret".into(),
            api_key: "api-key".into(),
            oauth_secret: "oauth-secret".into(),
            token_url: "http://127.0.0.1:9/token".into(),
            api_url: "http://127.0.0.1:9/api".into(),
        });
        let http = reqwest::Client::new();

        // Seed the token cache so the failure comes from the search
        // endpoint, not the OAuth exchange.
        let tokens = TokenProvider::with_cached_token(http.clone(), config.clone(), "token");
        let client = SearchClient::new(http, config, tokens);

        let err = client.search("any query").await.unwrap_err();
        assert_matches!(err, Error::Http(_));
    }
}
