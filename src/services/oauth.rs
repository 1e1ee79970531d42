use tracing::{error, info, warn};

use crate::auth::OAuthState;
use crate::database::{NewConnection, NotionConnection};
use crate::error::ApiError;
use crate::notion::TokenResponse;
use crate::state::AppState;

/// Build the Notion authorize URL for `user_id`, remembering where the
/// browser should land afterwards.
pub fn authorization_url(
    state: &AppState,
    user_id: &str,
    frontend_url: Option<&str>,
) -> Result<String, ApiError> {
    let frontend_url = match frontend_url.map(str::trim).filter(|u| !u.is_empty()) {
        Some(url) => validate_frontend_url(state, url)?,
        None => state.config.frontend.url.clone(),
    };

    let encoded = OAuthState::new(user_id, frontend_url).encode().map_err(|e| {
        error!("Failed to encode OAuth state: {}", e);
        ApiError::internal_server_error("Failed to generate authentication URL")
    })?;
    Ok(state.notion.authorize_url(&encoded)?)
}

fn validate_frontend_url(state: &AppState, raw: &str) -> Result<String, ApiError> {
    let parsed = url::Url::parse(raw)
        .map_err(|_| ApiError::invalid_field("frontendUrl", "must be an absolute URL"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ApiError::invalid_field("frontendUrl", "must use http or https"));
    }
    if !state.config.is_allowed_origin(raw) {
        return Err(ApiError::invalid_field("frontendUrl", "origin is not allowed"));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

/// Exchange `code`, resolve the workspace name and upsert the connection
pub async fn complete_authorization(
    state: &AppState,
    code: &str,
    user_id: &str,
) -> Result<NotionConnection, ApiError> {
    let token = state.notion.exchange_code(code).await?;

    let workspace_name = workspace_name(state, &token).await;

    let connection = NewConnection {
        user_id: user_id.to_string(),
        workspace_id: token.workspace_id,
        workspace_name: Some(workspace_name),
        access_token: token.access_token,
        refresh_token: token.refresh_token.unwrap_or_default(),
        bot_id: token.bot_id,
    };

    let saved = state.connections().upsert(&connection).await?;
    info!(connection_id = saved.id, "Completed Notion authorization for {}", user_id);
    Ok(saved)
}

/// Name from the token response, else from `/v1/users/me`, else DEFAULT_WORKSPACE_NAME
pub async fn workspace_name(state: &AppState, token: &TokenResponse) -> String {
    if let Some(name) = token.workspace_name.as_deref().filter(|n| !n.trim().is_empty()) {
        return name.to_string();
    }

    let fallback = || state.config.defaults.workspace_name.clone();
    match state.notion.bot_user(&token.access_token).await {
        Ok(user) => user
            .bot
            .and_then(|bot| bot.workspace_name)
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(fallback),
        Err(e) => {
            warn!("Failed to fetch workspace name: {}", e);
            fallback()
        }
    }
}
