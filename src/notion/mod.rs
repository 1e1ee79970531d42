pub mod client;
pub mod types;

pub use client::{NotionClient, NotionError};
pub use types::{BotUser, TokenResponse};
