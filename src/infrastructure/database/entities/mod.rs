//! SeaORM entities, one per table

pub mod bill;
pub mod meter;
pub mod payment;
pub mod user;
pub mod utility;
