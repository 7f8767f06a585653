//! Payment repository interface
//!
//! Deliberately has no `create`: payments come into existence only through
//! the settlement transaction. `delete` is the administrative removal; it
//! does NOT revert the bill's status (see DESIGN.md).

use async_trait::async_trait;

use super::model::Payment;
use crate::domain::DomainResult;

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn find_all(&self) -> DomainResult<Vec<Payment>>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Payment>>;
    async fn find_by_bill(&self, bill_id: i32) -> DomainResult<Option<Payment>>;
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
