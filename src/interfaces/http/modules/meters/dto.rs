//! Meter DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Meter;

/// Meter API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeterDto {
    pub id: i32,
    pub serial_no: String,
    pub user_id: i32,
    pub utility_id: i32,
    pub installed_at: DateTime<Utc>,
}

impl From<Meter> for MeterDto {
    fn from(m: Meter) -> Self {
        Self {
            id: m.id,
            serial_no: m.serial_no,
            user_id: m.user_id,
            utility_id: m.utility_id,
            installed_at: m.installed_at,
        }
    }
}

/// Optional list filters
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct MeterFilter {
    /// Filter by owning user
    pub user_id: Option<i32>,
}

/// Register meter request. The referenced user and utility must exist.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMeterRequest {
    #[validate(length(min = 1, max = 50))]
    pub serial_no: String,
    #[validate(range(min = 1))]
    pub user_id: i32,
    #[validate(range(min = 1))]
    pub utility_id: i32,
}
