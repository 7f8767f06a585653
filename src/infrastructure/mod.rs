//! Infrastructure layer: database connection, schema and SeaORM repositories

pub mod database;

pub use database::{init_database, DatabaseConfig};
