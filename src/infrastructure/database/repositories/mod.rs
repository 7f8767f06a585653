//! SeaORM repository implementations

pub mod bill_repository;
pub mod meter_repository;
pub mod payment_repository;
pub mod repository_provider;
pub mod user_repository;
pub mod utility_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use sea_orm::{DbErr, SqlErr};

use crate::domain::DomainError;

/// Classify a database error on the driver's structured error kind.
///
/// Uniqueness violations become `Conflict`, broken references become
/// `Validation` (the caller supplied an id that does not exist), everything
/// else is `Internal`. Conflict messages are fixed human-readable strings;
/// raw driver text stays out of response bodies. The violated column only
/// appears in the driver message, so picking the message is a substring
/// check, same known weak point as in the settlement engine.
pub(crate) fn map_db_err(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => {
            DomainError::Conflict(unique_violation_message(&msg).to_string())
        }
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            DomainError::Validation("referenced record does not exist".to_string())
        }
        _ => DomainError::Internal(e.to_string()),
    }
}

fn unique_violation_message(driver_msg: &str) -> &'static str {
    if driver_msg.contains("email") {
        "email already registered"
    } else if driver_msg.contains("serial_no") {
        "serial number already registered"
    } else if driver_msg.contains("utilities.name") || driver_msg.contains("utilities_name") {
        "utility name already exists"
    } else if driver_msg.contains("transaction_ref") {
        "duplicate transaction reference"
    } else if driver_msg.contains("bill_id") {
        "bill already has a payment"
    } else {
        "record violates a uniqueness constraint"
    }
}
