use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a successful `POST /v1/oauth/token`
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub bot_id: Option<String>,
    pub workspace_id: String,
    #[serde(default)]
    pub workspace_name: Option<String>,
    #[serde(default)]
    pub workspace_icon: Option<String>,
    #[serde(default)]
    pub owner: Option<Value>,
    #[serde(default)]
    pub duplicated_template_id: Option<String>,
}

/// Error body returned by the Notion API
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    /// Newer endpoints use `message` instead of `error_description`
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn best_message(&self) -> Option<&str> {
        [&self.error_description, &self.message, &self.error]
            .into_iter()
            .filter_map(|m| m.as_deref())
            .find(|m| !m.trim().is_empty())
    }
}

/// `GET /v1/users/me` for a bot token
#[derive(Debug, Clone, Deserialize)]
pub struct BotUser {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bot: Option<BotInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BotInfo {
    #[serde(default)]
    pub workspace_name: Option<String>,
}

/// Request body for the authorization code grant
#[derive(Debug, Serialize)]
pub(crate) struct TokenRequest<'a> {
    pub grant_type: &'static str,
    pub code: &'a str,
    pub redirect_uri: &'a str,
}
