pub mod connection;

pub use connection::{NewConnection, NotionConnection};
