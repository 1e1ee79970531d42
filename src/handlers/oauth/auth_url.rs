// handlers/oauth/auth_url.rs - GET /auth/url handler

use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::middleware::{ApiQuery, ApiResponse, ApiResult};
use crate::services;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUrlQuery {
    /// Application user starting the authorization. Defaults to DEFAULT_USER_ID.
    pub user_id: Option<String>,
    /// Where the browser returns once Notion is done. Defaults to FRONTEND_URL.
    pub frontend_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUrlResponse {
    pub auth_url: String,
    pub client_id: String,
    pub redirect_uri: String,
}

/// GET /auth/url - Notion authorize URL with the encoded state attached
pub async fn get(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AuthUrlQuery>,
) -> ApiResult<AuthUrlResponse> {
    let user_id = state.user_or_default(query.user_id);
    let auth_url = services::authorization_url(&state, &user_id, query.frontend_url.as_deref())?;

    tracing::info!("Generated Notion auth URL for user {}", user_id);

    Ok(ApiResponse::success(AuthUrlResponse {
        auth_url,
        client_id: state.notion.client_id().to_string(),
        redirect_uri: state.notion.redirect_uri().to_string(),
    }))
}
