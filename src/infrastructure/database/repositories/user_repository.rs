//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use tracing::debug;

use super::map_db_err;
use crate::domain::user::{User, UserRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::user;

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(u: user::Model) -> User {
    User {
        id: u.id,
        full_name: u.full_name,
        email: u.email,
        created_at: u.created_at,
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_all(&self) -> DomainResult<Vec<User>> {
        let models = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn create(&self, full_name: String, email: String) -> DomainResult<User> {
        debug!("Creating user: {}", email);
        let model = user::ActiveModel {
            full_name: Set(full_name),
            email: Set(email),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        let inserted = model.insert(&self.db).await.map_err(map_db_err)?;
        Ok(model_to_domain(inserted))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let res = user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;
        if res.rows_affected == 0 {
            return Err(DomainError::not_found("User", "id", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ConnectOptions, Database};
    use sea_orm_migration::MigratorTrait;

    use super::*;
    use crate::infrastructure::database::migrator::Migrator;

    async fn setup_repo() -> SeaOrmUserRepository {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1);
        let db = Database::connect(opt).await.expect("connect");
        Migrator::up(&db, None).await.expect("migrate");
        SeaOrmUserRepository::new(db)
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict_without_driver_text() {
        let repo = setup_repo().await;
        repo.create("Ada Lovelace".to_string(), "ada@example.com".to_string())
            .await
            .unwrap();

        let err = repo
            .create("Ada L.".to_string(), "ada@example.com".to_string())
            .await
            .unwrap_err();

        match err {
            DomainError::Conflict(msg) => {
                assert_eq!(msg, "email already registered");
                assert!(!msg.to_lowercase().contains("constraint"), "got {}", msg);
            }
            other => panic!("expected Conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn delete_missing_user_is_not_found() {
        let repo = setup_repo().await;
        let err = repo.delete(404).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
