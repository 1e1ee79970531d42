// handlers/public/mod.rs - Service-level endpoints with no user context

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

/// GET / - service name and route map
pub async fn root() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "name": "notion-bridge",
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": {
                "health": "/health, /api/health",
                "auth_url": "/auth/url?userId=&frontendUrl=",
                "callback": "/callback, /notion/callback",
                "connections": "/connections?userId=, /connections/:id",
                "prefixed": "/api/notion/*",
            }
        }
    }))
}

/// GET /health - liveness plus a database ping
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.db.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "environment": state.config.environment,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            let mut body = json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "environment": state.config.environment,
                    "database": "unavailable"
                }
            });
            // Driver errors can name hosts and users, so only development shows them
            if state.config.is_development() {
                body["details"] = json!(e.to_string());
            }
            (StatusCode::SERVICE_UNAVAILABLE, Json(body))
        }
    }
}

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}
