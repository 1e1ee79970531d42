pub mod commands;
pub mod utils;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::database::DatabaseManager;
use crate::notion::NotionClient;
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "notion-bridge")]
#[command(about = "Notion workspace OAuth bridge")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides PORT)")]
        port: Option<u16>,
    },

    #[command(about = "Print a Notion authorization URL")]
    AuthUrl {
        #[arg(long, help = "Application user id (defaults to DEFAULT_USER_ID)")]
        user: Option<String>,
        #[arg(long, help = "Frontend URL to return to (defaults to FRONTEND_URL)")]
        frontend_url: Option<String>,
    },

    #[command(about = "Stored workspace connections")]
    Connections {
        #[command(subcommand)]
        cmd: commands::connections::ConnectionCommands,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let config = AppConfig::from_env()?;

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => commands::serve::handle(config, port).await,
        Commands::AuthUrl { user, frontend_url } => {
            commands::auth_url::handle(config, user, frontend_url, output_format).await
        }
        Commands::Connections { cmd } => commands::connections::handle(config, cmd, output_format).await,
    }
}

/// Assemble handler dependencies. `eager` connects to Postgres up front.
pub async fn build_state(config: AppConfig, eager: bool) -> anyhow::Result<AppState> {
    let db = if eager {
        DatabaseManager::connect(&config.database)
            .await
            .context("failed to connect to database")?
    } else {
        DatabaseManager::connect_lazy(&config.database)?
    };
    let notion = NotionClient::new(config.notion.clone())?;
    Ok(AppState::new(config, db, notion))
}
