//! User domain entity

use chrono::{DateTime, Utc};

/// Account holder that owns one or more meters
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub full_name: String,
    /// Unique across all users
    pub email: String,
    pub created_at: DateTime<Utc>,
}
