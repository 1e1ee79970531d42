use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A stored link between an application user and a Notion workspace.
/// Tokens never leave the service through serialization.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct NotionConnection {
    pub id: i32,
    pub user_id: String,
    pub workspace_id: String,
    pub workspace_name: Option<String>,
    #[serde(skip_serializing)]
    pub access_token: String,
    #[serde(skip_serializing)]
    pub refresh_token: String,
    pub bot_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Values written by the OAuth callback
#[derive(Debug, Clone)]
pub struct NewConnection {
    pub user_id: String,
    pub workspace_id: String,
    pub workspace_name: Option<String>,
    pub access_token: String,
    /// Empty when Notion did not issue one
    pub refresh_token: String,
    pub bot_id: Option<String>,
}
