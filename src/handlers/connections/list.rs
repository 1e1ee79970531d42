// handlers/connections/list.rs - GET /connections handler

use axum::extract::State;

use crate::database::NotionConnection;
use crate::middleware::{ApiQuery, ApiResponse, ApiResult};
use crate::state::AppState;

use super::ConnectionsQuery;

/// GET /connections - every workspace the user has connected, newest first
pub async fn get(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ConnectionsQuery>,
) -> ApiResult<Vec<NotionConnection>> {
    let user_id = state.user_or_default(query.user_id);
    let connections = state.connections().list_for_user(&user_id).await?;
    Ok(ApiResponse::success(connections))
}
