//! Domain layer: billing entities and repository interfaces
//!
//! Aggregates are plain structs; persistence lives behind `async_trait`
//! repository traits implemented in `infrastructure::database`.

pub mod bill;
pub mod meter;
pub mod payment;
pub mod repositories;
pub mod user;
pub mod utility;

pub use bill::{Bill, BillStatus};
pub use meter::Meter;
pub use payment::Payment;
pub use repositories::RepositoryProvider;
pub use user::User;
pub use utility::Utility;

pub use crate::shared::errors::{DomainError, DomainResult};
