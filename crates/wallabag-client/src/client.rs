//! HTTP calls against the wallabag API.

use std::time::Duration;

use reqwest::{header, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::config::WallabagConfig;
use crate::error::WallabagError;
use crate::mask_token;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Body of a successful token exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Lifetime in seconds from the moment of issue.
    pub expires_in: i64,
}

#[derive(Serialize)]
struct CreateEntryRequest<'a> {
    url: &'a str,
}

/// Stateless client; credential caching is left to the caller.
#[derive(Clone)]
pub struct WallabagClient {
    http: reqwest::Client,
    config: WallabagConfig,
}

impl WallabagClient {
    pub fn new(config: WallabagConfig) -> Result<Self, WallabagError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, config })
    }

    /// Password-grant token exchange. Any non-200 status or unusable body is an error.
    #[instrument(skip(self), fields(site = %self.config.site))]
    pub async fn fetch_token(&self) -> Result<TokenResponse, WallabagError> {
        info!(
            client_id = %self.config.client_id,
            client_secret = %mask_token(&self.config.client_secret),
            username = %self.config.username,
            "Requesting wallabag token"
        );

        let response = self
            .http
            .get(self.config.token_url())
            .query(&[
                ("grant_type", "password"),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("username", self.config.username.as_str()),
                ("password", self.config.password.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            error!(status = status.as_u16(), headers = ?response.headers(), "Fail to get token");
            return Err(WallabagError::Status {
                endpoint: "token endpoint",
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| WallabagError::InvalidTokenResponse(e.to_string()))?;
        if token.access_token.is_empty() {
            return Err(WallabagError::InvalidTokenResponse(
                "empty access_token".to_string(),
            ));
        }

        info!(
            token = %mask_token(&token.access_token),
            expires_in = token.expires_in,
            "New token fetched"
        );
        Ok(token)
    }

    /// Submits `url` as a new entry. Only HTTP 200 counts as success.
    #[instrument(skip(self, token))]
    pub async fn create_entry(&self, token: &str, url: &str) -> Result<(), WallabagError> {
        let response = self
            .http
            .post(self.config.entries_url())
            .header(header::ACCEPT, "application/json")
            .header(header::CONTENT_TYPE, "application/json")
            .bearer_auth(token)
            .json(&CreateEntryRequest { url })
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(WallabagError::Status {
                endpoint: "entries endpoint",
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}
