use reqwest::{header, StatusCode};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::NotionConfig;

use super::types::{BotUser, ErrorBody, TokenRequest, TokenResponse};

/// Errors from the Notion HTTP API
#[derive(Debug, Error)]
pub enum NotionError {
    #[error("Invalid Notion API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Notion request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status; `message` is what Notion reported
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    #[error("Unexpected response from Notion: {0}")]
    InvalidResponse(String),
}

/// Thin client for the handful of Notion endpoints the OAuth flow needs
#[derive(Debug, Clone)]
pub struct NotionClient {
    http: reqwest::Client,
    config: NotionConfig,
}

impl NotionClient {
    pub fn new(config: NotionConfig) -> Result<Self, NotionError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("notion-bridge/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn client_id(&self) -> &str {
        &self.config.client_id
    }

    pub fn redirect_uri(&self) -> &str {
        &self.config.redirect_uri
    }

    fn endpoint(&self, path: &str) -> Result<url::Url, NotionError> {
        Ok(url::Url::parse(&format!("{}{}", self.config.api_base_url, path))?)
    }

    /// URL the browser is sent to so the user can pick a workspace
    pub fn authorize_url(&self, state: &str) -> Result<String, NotionError> {
        let mut url = self.endpoint("/v1/oauth/authorize")?;
        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("owner", "user")
            .append_pair("state", state);
        Ok(url.into())
    }

    /// Exchange an authorization code for a bot access token
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, NotionError> {
        let url = self.endpoint("/v1/oauth/token")?;
        debug!("Exchanging authorization code at {}", url);

        let response = self
            .http
            .post(url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .json(&TokenRequest {
                grant_type: "authorization_code",
                code,
                redirect_uri: &self.config.redirect_uri,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let request_id = response
                .headers()
                .get("x-request-id")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let body: ErrorBody = response.json().await.unwrap_or_default();
            error!(
                status = status.as_u16(),
                error = ?body.error,
                request_id = ?request_id,
                "Token exchange rejected by Notion"
            );
            let message = body
                .best_message()
                .map(str::to_string)
                .unwrap_or_else(|| format!("Failed to exchange code for token (HTTP {})", status.as_u16()));
            return Err(NotionError::Api { status, message });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| NotionError::InvalidResponse(e.to_string()))?;
        info!(workspace_id = %token.workspace_id, "Exchanged authorization code");
        Ok(token)
    }

    /// The bot user behind an access token
    pub async fn bot_user(&self, access_token: &str) -> Result<BotUser, NotionError> {
        let url = self.endpoint("/v1/users/me")?;

        let response = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .header("Notion-Version", &self.config.api_version)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: ErrorBody = response.json().await.unwrap_or_default();
            let message = body
                .best_message()
                .map(str::to_string)
                .unwrap_or_else(|| format!("Failed to fetch bot user (HTTP {})", status.as_u16()));
            return Err(NotionError::Api { status, message });
        }

        response
            .json()
            .await
            .map_err(|e| NotionError::InvalidResponse(e.to_string()))
    }
}
