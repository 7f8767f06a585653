//! Payment entity
//!
//! The unique index on `bill_id` is the settlement engine's mutual-exclusion
//! mechanism under concurrent requests: first committer wins, the second
//! insert fails with a uniqueness violation.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Exactly one payment per bill
    #[sea_orm(unique)]
    pub bill_id: i32,

    /// Free-form payment method label
    pub method: String,

    /// External processor reference, globally unique when present
    #[sea_orm(nullable, unique)]
    pub transaction_ref: Option<String>,

    pub paid_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::bill::Entity",
        from = "Column::BillId",
        to = "super::bill::Column::Id"
    )]
    Bill,
}

impl Related<super::bill::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bill.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
