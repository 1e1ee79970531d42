// handlers/oauth/callback.rs - GET /callback handler (Notion redirect target)
//
// Always answers with a redirect back to the frontend, success or not.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Redirect,
};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::auth::{error_redirect, CallbackTarget};
use crate::services;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

pub async fn get(
    State(state): State<AppState>,
    query: Result<Query<CallbackQuery>, QueryRejection>,
) -> Redirect {
    let frontend_url = &state.config.frontend.url;

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            warn!("Malformed OAuth callback query: {}", rejection.body_text());
            return Redirect::to(&error_redirect(frontend_url, "Invalid callback parameters"));
        }
    };

    if let Some(oauth_error) = query.error.as_deref().filter(|e| !e.is_empty()) {
        warn!("Notion returned OAuth error: {}", oauth_error);
        return Redirect::to(&error_redirect(frontend_url, oauth_error));
    }

    let Some(code) = query.code.as_deref().filter(|c| !c.trim().is_empty()) else {
        warn!("OAuth callback without authorization code");
        return Redirect::to(&error_redirect(frontend_url, "No authorization code received"));
    };

    let target = CallbackTarget::resolve(query.state.as_deref(), &state.config);
    info!("Processing OAuth callback for user {}", target.user_id);

    match services::complete_authorization(&state, code, &target.user_id).await {
        Ok(_) => Redirect::to(&target.success_url()),
        Err(e) => {
            error!("OAuth callback error: {}", e);
            Redirect::to(&target.error_url(e.message()))
        }
    }
}
