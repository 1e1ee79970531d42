pub mod oauth;

pub use oauth::{authorization_url, complete_authorization, workspace_name};
