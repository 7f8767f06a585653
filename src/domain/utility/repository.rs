//! Utility repository interface

use async_trait::async_trait;

use super::model::Utility;
use crate::domain::DomainResult;

#[async_trait]
pub trait UtilityRepository: Send + Sync {
    async fn find_all(&self) -> DomainResult<Vec<Utility>>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Utility>>;
    async fn create(&self, name: String, unit: String) -> DomainResult<Utility>;
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
