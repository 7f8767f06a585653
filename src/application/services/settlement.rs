//! Payment settlement engine
//!
//! Records a payment and flips its bill to "paid" inside one store
//! transaction. Invariants enforced here and by the schema:
//!
//! - a bill is settled at most once (unique index on `payments.bill_id`)
//! - a transaction reference, when present, is globally unique
//! - the payment insert and the status flip commit together or not at all
//!
//! The engine is stateless and safe to call concurrently for the same bill:
//! the unique index makes the first committer win, the second caller gets a
//! `Conflict`. No retries are performed here; callers may retry `Internal`
//! failures at their own discretion, never `Conflict` or `NotFound`.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, Set, SqlErr, TransactionTrait,
};
use tracing::{error, info};

use crate::domain::bill::BillStatus;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{bill, payment};

/// Result of a successful settlement
#[derive(Debug, Clone)]
pub struct SettlementReceipt {
    pub payment_id: i32,
    pub bill_id: i32,
    /// Always `Paid` on success
    pub bill_status: BillStatus,
}

/// Settlement engine over an injected store handle.
///
/// The connection's lifecycle is owned by the hosting process; the engine
/// never opens or closes it.
#[derive(Clone)]
pub struct SettlementService {
    db: DatabaseConnection,
}

impl SettlementService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Settle a bill: insert the payment row and mark the bill paid,
    /// atomically.
    ///
    /// Input is validated before any store access. `transaction_ref` is
    /// trimmed; an empty string means "no reference".
    pub async fn settle_payment(
        &self,
        bill_id: i32,
        payment_method: &str,
        transaction_ref: Option<&str>,
    ) -> DomainResult<SettlementReceipt> {
        if bill_id <= 0 {
            return Err(DomainError::Validation(
                "bill id must be a positive integer".to_string(),
            ));
        }
        let method = payment_method.trim();
        if method.is_empty() {
            return Err(DomainError::Validation(
                "payment method must not be empty".to_string(),
            ));
        }
        let reference = transaction_ref
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_owned);

        // Early reject, not the correctness guard: state can change between
        // this read and the transaction below. The unique index on
        // payments.bill_id is what actually prevents double settlement.
        let current = bill::Entity::find_by_id(bill_id)
            .one(&self.db)
            .await
            .map_err(DomainError::internal)?
            .ok_or_else(|| DomainError::not_found("Bill", "id", bill_id))?;

        if current.status.eq_ignore_ascii_case(BillStatus::Paid.as_str()) {
            return Err(DomainError::Conflict(format!(
                "bill {} is already paid",
                bill_id
            )));
        }

        let txn = self.db.begin().await.map_err(DomainError::internal)?;

        let new_payment = payment::ActiveModel {
            bill_id: Set(bill_id),
            method: Set(method.to_string()),
            transaction_ref: Set(reference),
            paid_at: Set(Utc::now()),
            ..Default::default()
        };
        let inserted = match new_payment.insert(&txn).await {
            Ok(model) => model,
            Err(e) => return Err(Self::abort(txn, classify_insert_error(e)).await),
        };

        let updated = bill::Entity::update_many()
            .col_expr(bill::Column::Status, Expr::value(BillStatus::Paid.as_str()))
            .filter(bill::Column::Id.eq(bill_id))
            .exec(&txn)
            .await;
        match updated {
            // Bill vanished between the pre-check and the update: lost race
            // against a concurrent delete.
            Ok(res) if res.rows_affected == 0 => {
                return Err(Self::abort(txn, DomainError::not_found("Bill", "id", bill_id)).await);
            }
            Ok(_) => {}
            Err(e) => return Err(Self::abort(txn, DomainError::internal(e)).await),
        }

        // A failed commit leaves the transaction to be rolled back on the
        // store side when it is dropped.
        txn.commit().await.map_err(DomainError::internal)?;

        info!(
            payment_id = inserted.id,
            bill_id, method, "bill settled"
        );

        Ok(SettlementReceipt {
            payment_id: inserted.id,
            bill_id,
            bill_status: BillStatus::Paid,
        })
    }

    /// Single rollback funnel for every failure path inside the transaction.
    /// A rollback failure is reported as `Internal`, never swallowed.
    async fn abort(txn: DatabaseTransaction, err: DomainError) -> DomainError {
        if let Err(rb) = txn.rollback().await {
            error!(
                "Rollback failed after settlement error: {} (original error: {})",
                rb, err
            );
            return DomainError::Internal(format!("rollback failed: {}", rb));
        }
        err
    }
}

/// Classify an insert failure on the driver's structured error kind.
fn classify_insert_error(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => {
            // The violated column only appears in the message text; this
            // substring check is the documented weak point when telling the
            // two unique indexes apart across drivers.
            if msg.contains("transaction_ref") {
                DomainError::Conflict("duplicate transaction reference".to_string())
            } else {
                DomainError::Conflict("bill already has a payment".to_string())
            }
        }
        _ => DomainError::internal(e),
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectOptions, Database, EntityTrait, PaginatorTrait,
        QueryFilter, Set,
    };
    use sea_orm_migration::MigratorTrait;

    use super::*;
    use crate::infrastructure::database::entities::{meter, user, utility};
    use crate::infrastructure::database::migrator::Migrator;

    /// In-memory SQLite with a single pooled connection so all queries see
    /// the same database.
    async fn setup_db() -> DatabaseConnection {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1);
        let db = Database::connect(opt).await.expect("connect");
        Migrator::up(&db, None).await.expect("migrate");
        db
    }

    async fn seed_meter(db: &DatabaseConnection) -> i32 {
        let owner = user::ActiveModel {
            full_name: Set("Ada Lovelace".to_string()),
            email: Set(format!("ada+{}@example.com", Utc::now().timestamp_nanos_opt().unwrap_or(0))),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("insert user");

        let electricity = utility::ActiveModel {
            name: Set(format!("electricity-{}", owner.id)),
            unit: Set("kWh".to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("insert utility");

        meter::ActiveModel {
            serial_no: Set(format!("MTR-{}", owner.id)),
            user_id: Set(owner.id),
            utility_id: Set(electricity.id),
            installed_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("insert meter")
        .id
    }

    async fn seed_bill(db: &DatabaseConnection, meter_id: i32, amount: &str, status: &str) -> i32 {
        bill::ActiveModel {
            meter_id: Set(meter_id),
            period: Set("2026-07".to_string()),
            amount: Set(amount.parse::<Decimal>().unwrap()),
            due_date: Set(NaiveDate::from_ymd_opt(2026, 8, 15).unwrap()),
            status: Set(status.to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("insert bill")
        .id
    }

    async fn payment_count(db: &DatabaseConnection, bill_id: i32) -> u64 {
        payment::Entity::find()
            .filter(payment::Column::BillId.eq(bill_id))
            .count(db)
            .await
            .unwrap()
    }

    async fn bill_status(db: &DatabaseConnection, bill_id: i32) -> String {
        bill::Entity::find_by_id(bill_id)
            .one(db)
            .await
            .unwrap()
            .unwrap()
            .status
    }

    #[tokio::test]
    async fn settle_marks_bill_paid_and_returns_receipt() {
        let db = setup_db().await;
        let meter_id = seed_meter(&db).await;
        let bill_id = seed_bill(&db, meter_id, "450.00", "unpaid").await;
        let service = SettlementService::new(db.clone());

        let receipt = service
            .settle_payment(bill_id, "card", Some("TXN-001"))
            .await
            .expect("settlement should succeed");

        assert_eq!(receipt.bill_id, bill_id);
        assert_eq!(receipt.bill_status, BillStatus::Paid);
        assert_eq!(bill_status(&db, bill_id).await, "paid");
        assert_eq!(payment_count(&db, bill_id).await, 1);

        let stored = payment::Entity::find_by_id(receipt.payment_id)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.method, "card");
        assert_eq!(stored.transaction_ref.as_deref(), Some("TXN-001"));
    }

    #[tokio::test]
    async fn settling_paid_bill_is_conflict_and_leaves_store_unchanged() {
        let db = setup_db().await;
        let meter_id = seed_meter(&db).await;
        let bill_id = seed_bill(&db, meter_id, "450.00", "unpaid").await;
        let service = SettlementService::new(db.clone());

        service
            .settle_payment(bill_id, "card", Some("TXN-001"))
            .await
            .unwrap();

        let err = service
            .settle_payment(bill_id, "card", Some("TXN-002"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)), "got {:?}", err);

        assert_eq!(payment_count(&db, bill_id).await, 1);
        assert_eq!(bill_status(&db, bill_id).await, "paid");
    }

    #[tokio::test]
    async fn paid_precheck_is_case_insensitive() {
        let db = setup_db().await;
        let meter_id = seed_meter(&db).await;
        let bill_id = seed_bill(&db, meter_id, "10.00", "PAID").await;
        let service = SettlementService::new(db.clone());

        let err = service.settle_payment(bill_id, "cash", None).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(payment_count(&db, bill_id).await, 0);
    }

    #[tokio::test]
    async fn missing_bill_is_not_found() {
        let db = setup_db().await;
        let service = SettlementService::new(db);

        let err = service.settle_payment(9999, "card", None).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn blank_method_is_rejected_without_store_mutation() {
        let db = setup_db().await;
        let meter_id = seed_meter(&db).await;
        let bill_id = seed_bill(&db, meter_id, "25.50", "unpaid").await;
        let service = SettlementService::new(db.clone());

        let err = service.settle_payment(bill_id, "   ", None).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(payment_count(&db, bill_id).await, 0);
        assert_eq!(bill_status(&db, bill_id).await, "unpaid");
    }

    #[tokio::test]
    async fn nonpositive_bill_id_is_rejected() {
        let db = setup_db().await;
        let service = SettlementService::new(db);

        let err = service.settle_payment(0, "card", None).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = service.settle_payment(-7, "card", None).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn empty_reference_is_normalized_to_none() {
        let db = setup_db().await;
        let meter_id = seed_meter(&db).await;
        let bill_id = seed_bill(&db, meter_id, "30.00", "unpaid").await;
        let service = SettlementService::new(db.clone());

        let receipt = service
            .settle_payment(bill_id, "cash", Some("   "))
            .await
            .unwrap();

        let stored = payment::Entity::find_by_id(receipt.payment_id)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.transaction_ref, None);
    }

    #[tokio::test]
    async fn duplicate_reference_across_bills_is_conflict() {
        let db = setup_db().await;
        let meter_id = seed_meter(&db).await;
        let first = seed_bill(&db, meter_id, "100.00", "unpaid").await;
        let second = seed_bill(&db, meter_id, "200.00", "unpaid").await;
        let service = SettlementService::new(db.clone());

        service
            .settle_payment(first, "card", Some("TXN-DUP"))
            .await
            .unwrap();

        let err = service
            .settle_payment(second, "card", Some("TXN-DUP"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)), "got {:?}", err);

        // The losing bill is fully rolled back.
        assert_eq!(payment_count(&db, second).await, 0);
        assert_eq!(bill_status(&db, second).await, "unpaid");
    }

    #[tokio::test]
    async fn racing_payment_insert_is_conflict_and_rolls_back() {
        let db = setup_db().await;
        let meter_id = seed_meter(&db).await;
        let bill_id = seed_bill(&db, meter_id, "75.00", "unpaid").await;

        // Simulate a competing committer that won between the engine's
        // pre-check and its insert: the payment row exists but the bill
        // status was not flipped yet.
        payment::ActiveModel {
            bill_id: Set(bill_id),
            method: Set("card".to_string()),
            transaction_ref: Set(None),
            paid_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        let service = SettlementService::new(db.clone());
        let err = service.settle_payment(bill_id, "cash", None).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)), "got {:?}", err);

        // Rolled back: still exactly one payment, status untouched.
        assert_eq!(payment_count(&db, bill_id).await, 1);
        assert_eq!(bill_status(&db, bill_id).await, "unpaid");
    }

    #[tokio::test]
    async fn concurrent_settles_produce_exactly_one_payment() {
        let db = setup_db().await;
        let meter_id = seed_meter(&db).await;
        let bill_id = seed_bill(&db, meter_id, "60.00", "unpaid").await;
        let service = Arc::new(SettlementService::new(db.clone()));

        let a = {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.settle_payment(bill_id, "card", None).await })
        };
        let b = {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.settle_payment(bill_id, "cash", None).await })
        };

        let results = [a.await.unwrap(), b.await.unwrap()];
        let successes = results.iter().filter(|r| r.is_ok()).count();
        let conflicts = results
            .iter()
            .filter(|r| matches!(r, Err(DomainError::Conflict(_))))
            .count();

        assert_eq!(successes, 1, "exactly one settlement must win: {:?}", results);
        assert_eq!(conflicts, 1, "the loser must see a conflict: {:?}", results);
        assert_eq!(payment_count(&db, bill_id).await, 1);
        assert_eq!(bill_status(&db, bill_id).await, "paid");
    }
}
