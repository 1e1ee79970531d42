pub mod cors;
pub mod query;
pub mod response;

pub use cors::cors_layer;
pub use query::ApiQuery;
pub use response::{ApiResponse, ApiResult};
