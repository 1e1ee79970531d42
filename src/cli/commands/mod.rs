pub mod auth_url;
pub mod connections;
pub mod serve;
