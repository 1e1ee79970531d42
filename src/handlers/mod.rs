// handlers/mod.rs - HTTP handlers
//
// public      → liveness, service info and the JSON 404 fallback
// oauth       → authorize URL and the Notion redirect target
// connections → list/delete stored workspace connections
pub mod connections;
pub mod oauth;
pub mod public;
