//! Utility domain entity

use chrono::{DateTime, Utc};

/// A metered service type (electricity, water, gas, ...)
#[derive(Debug, Clone)]
pub struct Utility {
    pub id: i32,
    /// Unique across all utilities
    pub name: String,
    /// Unit of measure label shown on bills, e.g. "kWh" or "m3"
    pub unit: String,
    pub created_at: DateTime<Utc>,
}
