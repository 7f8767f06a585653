//! SeaORM implementation of UtilityRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use tracing::debug;

use super::map_db_err;
use crate::domain::utility::{Utility, UtilityRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::utility;

pub struct SeaOrmUtilityRepository {
    db: DatabaseConnection,
}

impl SeaOrmUtilityRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(u: utility::Model) -> Utility {
    Utility {
        id: u.id,
        name: u.name,
        unit: u.unit,
        created_at: u.created_at,
    }
}

#[async_trait]
impl UtilityRepository for SeaOrmUtilityRepository {
    async fn find_all(&self) -> DomainResult<Vec<Utility>> {
        let models = utility::Entity::find()
            .order_by_asc(utility::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Utility>> {
        let model = utility::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn create(&self, name: String, unit: String) -> DomainResult<Utility> {
        debug!("Creating utility: {}", name);
        let model = utility::ActiveModel {
            name: Set(name),
            unit: Set(unit),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        let inserted = model.insert(&self.db).await.map_err(map_db_err)?;
        Ok(model_to_domain(inserted))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let res = utility::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;
        if res.rows_affected == 0 {
            return Err(DomainError::not_found("Utility", "id", id));
        }
        Ok(())
    }
}
