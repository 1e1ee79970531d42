use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Errors raised while assembling configuration from the environment
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingVars(Vec<&'static str>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub notion: NotionConfig,
    pub frontend: FrontendConfig,
    pub security: SecurityConfig,
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotionConfig {
    pub client_id: String,
    #[serde(skip_serializing)]
    pub client_secret: String,
    pub redirect_uri: String,
    pub api_base_url: String,
    pub api_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontendConfig {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    pub user_id: String,
    pub workspace_name: String,
}

const REQUIRED_VARS: &[&str] = &[
    "DATABASE_URL",
    "NOTION_CLIENT_ID",
    "NOTION_CLIENT_SECRET",
    "NOTION_REDIRECT_URI",
    "FRONTEND_URL",
];

const DEV_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "http://127.0.0.1:5173",
    "http://localhost:3000",
    "http://127.0.0.1:3000",
];

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let missing: Vec<&'static str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|key| var(*key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingVars(missing));
        }
        let required = |key: &str| var(key).unwrap_or_default();

        let environment = match var("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let mut config = Self::defaults_for(environment);
        config.database.url = required("DATABASE_URL");
        config.notion.client_id = required("NOTION_CLIENT_ID");
        config.notion.client_secret = required("NOTION_CLIENT_SECRET");
        config.notion.redirect_uri = required("NOTION_REDIRECT_URI");
        config.frontend.url = required("FRONTEND_URL").trim_end_matches('/').to_string();

        Ok(config.with_overrides(var))
    }

    fn with_overrides<F>(mut self, var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        if let Some(v) = var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Some(v) = var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        if let Some(v) = var("NOTION_API_BASE_URL") {
            self.notion.api_base_url = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = var("NOTION_VERSION") {
            self.notion.api_version = v;
        }

        if let Some(v) = var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().trim_end_matches('/').to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Some(v) = var("DEFAULT_USER_ID") {
            self.defaults.user_id = v;
        }
        if let Some(v) = var("DEFAULT_WORKSPACE_NAME") {
            self.defaults.workspace_name = v;
        }

        self
    }

    fn defaults_for(environment: Environment) -> Self {
        let (max_connections, connection_timeout) = match environment {
            Environment::Development => (10, 30),
            Environment::Staging => (20, 10),
            Environment::Production => (50, 5),
        };
        let cors_origins = DEV_ORIGINS.iter().map(|s| s.to_string()).collect();

        Self {
            environment,
            server: ServerConfig { port: 5000 },
            database: DatabaseConfig {
                url: String::new(),
                max_connections,
                connection_timeout,
            },
            notion: NotionConfig {
                client_id: String::new(),
                client_secret: String::new(),
                redirect_uri: String::new(),
                api_base_url: "https://api.notion.com".to_string(),
                api_version: "2022-06-28".to_string(),
            },
            frontend: FrontendConfig { url: String::new() },
            security: SecurityConfig { cors_origins },
            defaults: DefaultsConfig {
                user_id: "anonymous".to_string(),
                workspace_name: "Notion Workspace".to_string(),
            },
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    /// Origins allowed for CORS and for post-authorization redirects.
    /// The configured frontend is always included.
    pub fn allowed_origins(&self) -> Vec<String> {
        let mut origins = self.security.cors_origins.clone();
        if let Some(frontend) = origin_of(&self.frontend.url) {
            if !origins.contains(&frontend) {
                origins.push(frontend);
            }
        }
        origins
    }

    pub fn is_allowed_origin(&self, candidate: &str) -> bool {
        match origin_of(candidate) {
            Some(origin) => self.allowed_origins().iter().any(|o| *o == origin),
            None => false,
        }
    }
}

/// `scheme://host[:port]` of an absolute URL
fn origin_of(raw: &str) -> Option<String> {
    let origin = url::Url::parse(raw).ok()?.origin();
    origin.is_tuple().then(|| origin.ascii_serialization())
}
