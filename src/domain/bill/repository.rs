//! Bill repository interface

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::model::Bill;
use crate::domain::DomainResult;

/// Fields for issuing a bill against a meter
#[derive(Debug, Clone)]
pub struct NewBill {
    pub meter_id: i32,
    pub period: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
}

#[async_trait]
pub trait BillRepository: Send + Sync {
    async fn find_all(&self) -> DomainResult<Vec<Bill>>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Bill>>;
    async fn find_by_meter(&self, meter_id: i32) -> DomainResult<Vec<Bill>>;
    async fn create(&self, bill: NewBill) -> DomainResult<Bill>;
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
