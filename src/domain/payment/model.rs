//! Payment domain entity

use chrono::{DateTime, Utc};

/// Settlement record for exactly one bill.
///
/// `bill_id` is unique across all payments (one payment per bill), and
/// `transaction_ref`, when present, is unique too. Both are enforced by
/// the store's unique indexes, not just by application checks.
#[derive(Debug, Clone)]
pub struct Payment {
    pub id: i32,
    pub bill_id: i32,
    /// Free-form label: "card", "bank transfer", ...
    pub method: String,
    /// External processor reference; absent for cash-like methods
    pub transaction_ref: Option<String>,
    pub paid_at: DateTime<Utc>,
}
