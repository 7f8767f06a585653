//! Application layer: business services

pub mod services;

pub use services::{SettlementReceipt, SettlementService};
