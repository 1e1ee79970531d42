use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::handlers::{connections, oauth, public};
use crate::middleware::cors_layer;
use crate::state::AppState;

/// Full application router
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .route("/api/health", get(public::health))
        // OAuth + connections, also under the /api/notion prefix
        .merge(notion_routes())
        .nest("/api/notion", notion_routes())
        .fallback(public::not_found)
        // Global middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn notion_routes() -> Router<AppState> {
    use axum::routing::delete;

    Router::new()
        .route("/auth", get(oauth::auth_url_get))
        .route("/auth/url", get(oauth::auth_url_get))
        .route("/callback", get(oauth::callback_get))
        .route("/notion/callback", get(oauth::callback_get))
        .route("/connections", get(connections::connections_get))
        .route("/connections/:id", delete(connections::connection_delete))
}
