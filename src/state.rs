use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::{ConnectionRepository, DatabaseManager};
use crate::notion::NotionClient;

/// Shared handler dependencies
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DatabaseManager,
    pub notion: NotionClient,
}

impl AppState {
    pub fn new(config: AppConfig, db: DatabaseManager, notion: NotionClient) -> Self {
        Self {
            config: Arc::new(config),
            db,
            notion,
        }
    }

    pub fn connections(&self) -> ConnectionRepository {
        ConnectionRepository::new(self.db.pool().clone())
    }

    /// The `userId` query value, or the configured default user
    pub fn user_or_default(&self, user_id: Option<String>) -> String {
        user_id
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| self.config.defaults.user_id.clone())
    }
}
