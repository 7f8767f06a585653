//! Payment aggregate
//!
//! A payment settles exactly one bill. Rows are created only by the
//! settlement engine (`application::services::SettlementService`), never
//! through the repository, and are immutable after creation.

pub mod model;
pub mod repository;

pub use model::Payment;
pub use repository::PaymentRepository;
