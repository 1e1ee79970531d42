// handlers/connections/delete.rs - DELETE /connections/:id handler

use axum::extract::{Path, State};

use crate::database::NotionConnection;
use crate::error::ApiError;
use crate::middleware::{ApiQuery, ApiResponse, ApiResult};
use crate::state::AppState;

use super::ConnectionsQuery;

/// DELETE /connections/:id - remove one of the user's connections
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiQuery(query): ApiQuery<ConnectionsQuery>,
) -> ApiResult<NotionConnection> {
    let id = parse_connection_id(&id)?;
    let user_id = state.user_or_default(query.user_id);

    let deleted = state.connections().delete_404(id, &user_id).await?;
    Ok(ApiResponse::success(deleted))
}

fn parse_connection_id(raw: &str) -> Result<i32, ApiError> {
    match raw.trim().parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::invalid_field("id", "must be a positive integer")),
    }
}
