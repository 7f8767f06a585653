//! Bill DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Bill;

/// Bill API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BillDto {
    pub id: i32,
    pub meter_id: i32,
    pub period: String,
    #[schema(value_type = String, example = "450.00")]
    pub amount: Decimal,
    pub due_date: NaiveDate,
    /// "unpaid", "overdue" or "paid"
    pub status: String,
}

impl From<Bill> for BillDto {
    fn from(b: Bill) -> Self {
        Self {
            id: b.id,
            meter_id: b.meter_id,
            period: b.period,
            amount: b.amount,
            due_date: b.due_date,
            status: b.status.as_str().to_string(),
        }
    }
}

/// Issue bill request. The referenced meter must exist.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBillRequest {
    #[validate(range(min = 1))]
    pub meter_id: i32,
    /// Billing period label, e.g. "2026-07"
    #[validate(length(min = 1, max = 20))]
    pub period: String,
    #[schema(value_type = String, example = "450.00")]
    pub amount: Decimal,
    pub due_date: NaiveDate,
}

/// Optional list filters
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct BillFilter {
    /// Filter by status (case-insensitive)
    pub status: Option<String>,
    /// Filter by owning meter
    pub meter_id: Option<i32>,
}
