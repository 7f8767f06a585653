//! Utility DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Utility;

/// Utility API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UtilityDto {
    pub id: i32,
    pub name: String,
    pub unit: String,
    pub created_at: DateTime<Utc>,
}

impl From<Utility> for UtilityDto {
    fn from(u: Utility) -> Self {
        Self {
            id: u.id,
            name: u.name,
            unit: u.unit,
            created_at: u.created_at,
        }
    }
}

/// Create utility request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUtilityRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    /// Unit of measure label, e.g. "kWh"
    #[validate(length(min = 1, max = 20))]
    pub unit: String,
}
