//! Meter repository interface

use async_trait::async_trait;

use super::model::Meter;
use crate::domain::DomainResult;

/// Fields for registering a meter. The referenced user and utility must
/// already exist; the store's foreign keys enforce it.
#[derive(Debug, Clone)]
pub struct NewMeter {
    pub serial_no: String,
    pub user_id: i32,
    pub utility_id: i32,
}

#[async_trait]
pub trait MeterRepository: Send + Sync {
    async fn find_all(&self) -> DomainResult<Vec<Meter>>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Meter>>;
    async fn find_by_user(&self, user_id: i32) -> DomainResult<Vec<Meter>>;
    async fn create(&self, meter: NewMeter) -> DomainResult<Meter>;
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
