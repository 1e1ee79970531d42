use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{output_connections, output_success};
use crate::cli::{build_state, OutputFormat};
use crate::config::AppConfig;
use crate::state::AppState;

#[derive(Subcommand)]
pub enum ConnectionCommands {
    #[command(about = "List a user's connections")]
    List {
        #[arg(long, help = "Application user id (defaults to DEFAULT_USER_ID)")]
        user: Option<String>,
    },

    #[command(about = "Delete a connection")]
    Delete {
        #[arg(help = "Connection id")]
        id: i32,
        #[arg(long, help = "Owning user id (defaults to DEFAULT_USER_ID)")]
        user: Option<String>,
    },
}

pub async fn handle(config: AppConfig, cmd: ConnectionCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let state = build_state(config, true).await?;

    run_and_close(&state, cmd, output_format).await
}

/// Runs `cmd` and closes the pool whether or not it succeeded
async fn run_and_close(state: &AppState, cmd: ConnectionCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let result = run_command(state, cmd, output_format).await;
    state.db.close().await;
    result
}

async fn run_command(state: &AppState, cmd: ConnectionCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let repository = state.connections();

    match cmd {
        ConnectionCommands::List { user } => {
            let user_id = state.user_or_default(user);
            let connections = repository.list_for_user(&user_id).await?;
            output_connections(output_format, &connections)
        }
        ConnectionCommands::Delete { id, user } => {
            let user_id = state.user_or_default(user);
            match repository.delete_for_user(id, &user_id).await? {
                Some(deleted) => output_success(
                    output_format,
                    &format!("Deleted connection {} ({})", deleted.id, deleted.workspace_id),
                    json!({ "connection": deleted }),
                ),
                None => Err(anyhow::anyhow!("connection {} not found for user {}", id, user_id)),
            }
        }
    }
}
