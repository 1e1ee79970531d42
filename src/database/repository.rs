use sqlx::PgPool;
use tracing::{debug, info};

use crate::database::manager::DatabaseError;
use crate::database::models::{NewConnection, NotionConnection};

const COLUMNS: &str = "id, user_id, workspace_id, workspace_name, access_token, refresh_token, \
                       bot_id, created_at, updated_at";

/// Parameterized access to the `notion_connections` table
#[derive(Debug, Clone)]
pub struct ConnectionRepository {
    pool: PgPool,
}

impl ConnectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a connection, or refresh tokens and name when the user already
    /// connected this workspace.
    pub async fn upsert(&self, conn: &NewConnection) -> Result<NotionConnection, DatabaseError> {
        let sql = format!(
            "INSERT INTO notion_connections \
                 (user_id, workspace_id, workspace_name, access_token, refresh_token, bot_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (user_id, workspace_id) DO UPDATE SET \
                 access_token = EXCLUDED.access_token, \
                 refresh_token = EXCLUDED.refresh_token, \
                 workspace_name = EXCLUDED.workspace_name, \
                 updated_at = NOW() \
             RETURNING {}",
            COLUMNS
        );

        let saved = sqlx::query_as::<_, NotionConnection>(&sql)
            .bind(&conn.user_id)
            .bind(&conn.workspace_id)
            .bind(&conn.workspace_name)
            .bind(&conn.access_token)
            .bind(&conn.refresh_token)
            .bind(&conn.bot_id)
            .fetch_one(&self.pool)
            .await?;

        info!(
            connection_id = saved.id,
            user_id = %saved.user_id,
            workspace_id = %saved.workspace_id,
            "Saved Notion connection"
        );
        Ok(saved)
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<NotionConnection>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM notion_connections WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
            COLUMNS
        );

        let rows = sqlx::query_as::<_, NotionConnection>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        debug!("Found {} connections for user {}", rows.len(), user_id);
        Ok(rows)
    }

    /// Delete a connection owned by `user_id`. `None` when nothing matched.
    pub async fn delete_for_user(
        &self,
        id: i32,
        user_id: &str,
    ) -> Result<Option<NotionConnection>, DatabaseError> {
        let sql = format!(
            "DELETE FROM notion_connections WHERE id = $1 AND user_id = $2 RETURNING {}",
            COLUMNS
        );

        let deleted = sqlx::query_as::<_, NotionConnection>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(conn) = &deleted {
            info!(connection_id = conn.id, user_id = %user_id, "Deleted Notion connection");
        }
        Ok(deleted)
    }

    /// Like `delete_for_user`, but a miss is an error
    pub async fn delete_404(&self, id: i32, user_id: &str) -> Result<NotionConnection, DatabaseError> {
        self.delete_for_user(id, user_id)
            .await?
            .ok_or_else(|| DatabaseError::NotFound("Connection not found".to_string()))
    }
}
