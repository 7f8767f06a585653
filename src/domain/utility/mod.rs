//! Utility aggregate

pub mod model;
pub mod repository;

pub use model::Utility;
pub use repository::UtilityRepository;
