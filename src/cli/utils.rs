use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::database::NotionConnection;

/// Output a success message in the appropriate format
pub fn output_success(output_format: OutputFormat, message: &str, data: Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let response = json!({
                "success": true,
                "message": message,
                "data": data
            });
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

pub fn output_connections(output_format: OutputFormat, connections: &[NotionConnection]) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ "connections": connections }))?);
        }
        OutputFormat::Text => {
            if connections.is_empty() {
                println!("No connections found");
                return Ok(());
            }
            println!("{:<8} {:<38} {:<30} {}", "ID", "WORKSPACE", "NAME", "CONNECTED");
            for conn in connections {
                println!(
                    "{:<8} {:<38} {:<30} {}",
                    conn.id,
                    conn.workspace_id,
                    conn.workspace_name.as_deref().unwrap_or("-"),
                    conn.created_at.map(|t| t.to_rfc3339()).unwrap_or_else(|| "-".to_string())
                );
            }
        }
    }
    Ok(())
}
