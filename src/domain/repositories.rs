//! Unified access to all per-aggregate repositories
//!
//! Consumers request only the repository they need:
//!
//! ```ignore
//! async fn handle(repos: &dyn RepositoryProvider) {
//!     let bill = repos.bills().find_by_id(7).await?;
//!     let payment = repos.payments().find_by_bill(7).await?;
//! }
//! ```

use super::bill::BillRepository;
use super::meter::MeterRepository;
use super::payment::PaymentRepository;
use super::user::UserRepository;
use super::utility::UtilityRepository;

pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn utilities(&self) -> &dyn UtilityRepository;
    fn meters(&self) -> &dyn MeterRepository;
    fn bills(&self) -> &dyn BillRepository;
    fn payments(&self) -> &dyn PaymentRepository;
}
