//! Meter domain entity

use chrono::{DateTime, Utc};

/// Consumption device owned by one user and tied to one utility type
#[derive(Debug, Clone)]
pub struct Meter {
    pub id: i32,
    /// Unique device serial number
    pub serial_no: String,
    pub user_id: i32,
    pub utility_id: i32,
    pub installed_at: DateTime<Utc>,
}
