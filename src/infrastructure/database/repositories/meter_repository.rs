//! SeaORM implementation of MeterRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use super::map_db_err;
use crate::domain::meter::{Meter, MeterRepository, NewMeter};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::meter;

pub struct SeaOrmMeterRepository {
    db: DatabaseConnection,
}

impl SeaOrmMeterRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: meter::Model) -> Meter {
    Meter {
        id: m.id,
        serial_no: m.serial_no,
        user_id: m.user_id,
        utility_id: m.utility_id,
        installed_at: m.installed_at,
    }
}

#[async_trait]
impl MeterRepository for SeaOrmMeterRepository {
    async fn find_all(&self) -> DomainResult<Vec<Meter>> {
        let models = meter::Entity::find()
            .order_by_asc(meter::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Meter>> {
        let model = meter::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_user(&self, user_id: i32) -> DomainResult<Vec<Meter>> {
        let models = meter::Entity::find()
            .filter(meter::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn create(&self, new: NewMeter) -> DomainResult<Meter> {
        debug!(
            "Registering meter {} (user {}, utility {})",
            new.serial_no, new.user_id, new.utility_id
        );
        let model = meter::ActiveModel {
            serial_no: Set(new.serial_no),
            user_id: Set(new.user_id),
            utility_id: Set(new.utility_id),
            installed_at: Set(Utc::now()),
            ..Default::default()
        };
        // Foreign keys reject unknown user/utility ids; surfaced as Validation.
        let inserted = model.insert(&self.db).await.map_err(map_db_err)?;
        Ok(model_to_domain(inserted))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let res = meter::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;
        if res.rows_affected == 0 {
            return Err(DomainError::not_found("Meter", "id", id));
        }
        Ok(())
    }
}
