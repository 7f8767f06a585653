//! SeaORM implementation of BillRepository

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use super::map_db_err;
use crate::domain::bill::{Bill, BillRepository, BillStatus, NewBill};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::bill;

pub struct SeaOrmBillRepository {
    db: DatabaseConnection,
}

impl SeaOrmBillRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(crate) fn model_to_domain(b: bill::Model) -> Bill {
    Bill {
        id: b.id,
        meter_id: b.meter_id,
        period: b.period,
        amount: b.amount,
        due_date: b.due_date,
        status: BillStatus::parse(&b.status),
    }
}

#[async_trait]
impl BillRepository for SeaOrmBillRepository {
    async fn find_all(&self) -> DomainResult<Vec<Bill>> {
        let models = bill::Entity::find()
            .order_by_desc(bill::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Bill>> {
        let model = bill::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_meter(&self, meter_id: i32) -> DomainResult<Vec<Bill>> {
        let models = bill::Entity::find()
            .filter(bill::Column::MeterId.eq(meter_id))
            .order_by_desc(bill::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn create(&self, new: NewBill) -> DomainResult<Bill> {
        if new.amount < Decimal::ZERO {
            return Err(DomainError::Validation(
                "bill amount must be non-negative".to_string(),
            ));
        }
        debug!("Issuing bill for meter {} period {}", new.meter_id, new.period);
        let model = bill::ActiveModel {
            meter_id: Set(new.meter_id),
            period: Set(new.period),
            amount: Set(new.amount),
            due_date: Set(new.due_date),
            status: Set(BillStatus::Unpaid.as_str().to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        let inserted = model.insert(&self.db).await.map_err(map_db_err)?;
        Ok(model_to_domain(inserted))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let res = bill::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;
        if res.rows_affected == 0 {
            return Err(DomainError::not_found("Bill", "id", id));
        }
        Ok(())
    }
}
