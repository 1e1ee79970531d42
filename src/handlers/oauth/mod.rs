pub mod auth_url;
pub mod callback;

pub use auth_url::get as auth_url_get;
pub use callback::get as callback_get;
