//! Bill aggregate
//!
//! A bill is a billing-period charge against a meter. Its status is flipped
//! to `Paid` only by the settlement engine; an external overdue-detection
//! process may flip `Unpaid` to `Overdue`.

pub mod model;
pub mod repository;

pub use model::{Bill, BillStatus};
pub use repository::{BillRepository, NewBill};
