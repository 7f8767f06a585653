//! SeaORM implementation of PaymentRepository
//!
//! Payment rows are inserted only by the settlement engine, inside its
//! transaction. This repository reads and removes them.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::warn;

use super::map_db_err;
use crate::domain::payment::{Payment, PaymentRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::payment;

pub struct SeaOrmPaymentRepository {
    db: DatabaseConnection,
}

impl SeaOrmPaymentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(crate) fn model_to_domain(p: payment::Model) -> Payment {
    Payment {
        id: p.id,
        bill_id: p.bill_id,
        method: p.method,
        transaction_ref: p.transaction_ref,
        paid_at: p.paid_at,
    }
}

#[async_trait]
impl PaymentRepository for SeaOrmPaymentRepository {
    async fn find_all(&self) -> DomainResult<Vec<Payment>> {
        let models = payment::Entity::find()
            .order_by_desc(payment::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Payment>> {
        let model = payment::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_bill(&self, bill_id: i32) -> DomainResult<Option<Payment>> {
        let model = payment::Entity::find()
            .filter(payment::Column::BillId.eq(bill_id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(model.map(model_to_domain))
    }

    /// Administrative removal. The bill's status is left untouched: deleting
    /// a payment does not un-pay the bill.
    async fn delete(&self, id: i32) -> DomainResult<()> {
        let res = payment::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;
        if res.rows_affected == 0 {
            return Err(DomainError::not_found("Payment", "id", id));
        }
        warn!("Payment {} removed; its bill remains marked paid", id);
        Ok(())
    }
}
