use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::{build_state, OutputFormat};
use crate::config::AppConfig;
use crate::services;

pub async fn handle(
    config: AppConfig,
    user: Option<String>,
    frontend_url: Option<String>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    // No database access needed to build a URL
    let state = build_state(config, false).await?;
    let user_id = state.user_or_default(user);
    let url = services::authorization_url(&state, &user_id, frontend_url.as_deref())?;

    match output_format {
        OutputFormat::Json => output_success(
            output_format,
            "Generated authorization URL",
            json!({ "authUrl": url, "userId": user_id }),
        ),
        OutputFormat::Text => {
            println!("{}", url);
            Ok(())
        }
    }
}
