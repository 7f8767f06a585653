//! User repository interface

use async_trait::async_trait;

use super::model::User;
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_all(&self) -> DomainResult<Vec<User>>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>>;
    async fn create(&self, full_name: String, email: String) -> DomainResult<User>;
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
