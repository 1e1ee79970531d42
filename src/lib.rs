pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod notion;
pub mod routes;
pub mod services;
pub mod state;

pub use routes::app;
pub use state::AppState;
