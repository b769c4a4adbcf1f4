pub mod connection;
pub mod movies;
pub mod schema;

pub use connection::*;
pub use movies::*;
pub use schema::*;
