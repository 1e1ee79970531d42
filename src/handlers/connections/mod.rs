pub mod delete;
pub mod list;

pub use delete::delete as connection_delete;
pub use list::get as connections_get;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionsQuery {
    /// Owner of the connections. Defaults to DEFAULT_USER_ID.
    pub user_id: Option<String>,
}
