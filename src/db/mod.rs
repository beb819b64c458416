pub mod connection;
pub mod schema;
pub mod scans;

pub use connection::Database;
