//! Payment DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::SettlementReceipt;
use crate::domain::Payment;

/// Settlement request body.
///
/// Validation happens inside the settlement engine so that malformed input
/// maps to 400 before any store access.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SettlePaymentRequest {
    pub bill_id: i32,
    pub payment_method: String,
    /// External processor reference; empty string means "no reference"
    pub transaction_ref: Option<String>,
}

/// Settlement result
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SettlementDto {
    pub payment_id: i32,
    pub bill_id: i32,
    /// Always "paid"
    pub bill_status: String,
}

impl From<SettlementReceipt> for SettlementDto {
    fn from(r: SettlementReceipt) -> Self {
        Self {
            payment_id: r.payment_id,
            bill_id: r.bill_id,
            bill_status: r.bill_status.as_str().to_string(),
        }
    }
}

/// Optional list filters
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct PaymentFilter {
    /// Filter by settled bill; a bill has at most one payment
    pub bill_id: Option<i32>,
}

/// Payment API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentDto {
    pub id: i32,
    pub bill_id: i32,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_ref: Option<String>,
    pub paid_at: DateTime<Utc>,
}

impl From<Payment> for PaymentDto {
    fn from(p: Payment) -> Self {
        Self {
            id: p.id,
            bill_id: p.bill_id,
            method: p.method,
            transaction_ref: p.transaction_ref,
            paid_at: p.paid_at,
        }
    }
}
