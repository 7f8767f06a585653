//! HTTP resource modules, one per entity

pub mod bills;
pub mod health;
pub mod meters;
pub mod payments;
pub mod users;
pub mod utilities;
