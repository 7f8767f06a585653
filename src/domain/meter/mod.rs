//! Meter aggregate

pub mod model;
pub mod repository;

pub use model::Meter;
pub use repository::{MeterRepository, NewMeter};
