//! # Utility Billing Administration Service
//!
//! REST API for managing utility accounts, meters, bills and payments.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities and repository traits
//! - **application**: Business services, most importantly payment settlement
//! - **infrastructure**: Database connection, schema migrations and SeaORM repositories
//! - **interfaces**: HTTP REST API with Swagger documentation
//! - **shared**: Cross-cutting concerns (errors, graceful shutdown)

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;

// Re-export API router
pub use interfaces::http::create_api_router;
