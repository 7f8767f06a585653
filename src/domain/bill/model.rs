//! Bill domain entity

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Bill lifecycle status.
///
/// Stored as a lowercase string; comparisons are case-insensitive because
/// imported data has carried mixed-case values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillStatus {
    Unpaid,
    Overdue,
    /// Terminal for the settlement engine: a paid bill is never settled again.
    Paid,
}

impl BillStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unpaid => "unpaid",
            Self::Overdue => "overdue",
            Self::Paid => "paid",
        }
    }

    /// Case-insensitive parse. Unknown values fall back to `Unpaid` so a
    /// malformed row can still be settled rather than wedged.
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("paid") {
            Self::Paid
        } else if s.eq_ignore_ascii_case("overdue") {
            Self::Overdue
        } else {
            Self::Unpaid
        }
    }
}

impl std::fmt::Display for BillStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A billing-period charge against a meter
#[derive(Debug, Clone)]
pub struct Bill {
    pub id: i32,
    pub meter_id: i32,
    /// Billing period label, e.g. "2026-07"
    pub period: String,
    /// Non-negative amount due
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub status: BillStatus,
}

impl Bill {
    pub fn is_paid(&self) -> bool {
        self.status == BillStatus::Paid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(BillStatus::parse("PAID"), BillStatus::Paid);
        assert_eq!(BillStatus::parse("Paid"), BillStatus::Paid);
        assert_eq!(BillStatus::parse("overdue"), BillStatus::Overdue);
        assert_eq!(BillStatus::parse("OVERDUE"), BillStatus::Overdue);
        assert_eq!(BillStatus::parse("unpaid"), BillStatus::Unpaid);
    }

    #[test]
    fn unknown_status_falls_back_to_unpaid() {
        assert_eq!(BillStatus::parse("pending"), BillStatus::Unpaid);
        assert_eq!(BillStatus::parse(""), BillStatus::Unpaid);
    }
}
