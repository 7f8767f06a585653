pub mod settlement;

pub use settlement::{SettlementReceipt, SettlementService};
