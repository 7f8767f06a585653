//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::bill::BillRepository;
use crate::domain::meter::MeterRepository;
use crate::domain::payment::PaymentRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::user::UserRepository;
use crate::domain::utility::UtilityRepository;

use super::bill_repository::SeaOrmBillRepository;
use super::meter_repository::SeaOrmMeterRepository;
use super::payment_repository::SeaOrmPaymentRepository;
use super::user_repository::SeaOrmUserRepository;
use super::utility_repository::SeaOrmUtilityRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let bill = repos.bills().find_by_id(7).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    users: SeaOrmUserRepository,
    utilities: SeaOrmUtilityRepository,
    meters: SeaOrmMeterRepository,
    bills: SeaOrmBillRepository,
    payments: SeaOrmPaymentRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmUserRepository::new(db.clone()),
            utilities: SeaOrmUtilityRepository::new(db.clone()),
            meters: SeaOrmMeterRepository::new(db.clone()),
            bills: SeaOrmBillRepository::new(db.clone()),
            payments: SeaOrmPaymentRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn utilities(&self) -> &dyn UtilityRepository {
        &self.utilities
    }

    fn meters(&self) -> &dyn MeterRepository {
        &self.meters
    }

    fn bills(&self) -> &dyn BillRepository {
        &self.bills
    }

    fn payments(&self) -> &dyn PaymentRepository {
        &self.payments
    }
}
