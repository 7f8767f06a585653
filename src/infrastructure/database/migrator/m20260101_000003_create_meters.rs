//! Create meters table

use sea_orm_migration::prelude::*;

use super::m20260101_000001_create_users::Users;
use super::m20260101_000002_create_utilities::Utilities;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Meters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Meters::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Meters::SerialNo)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Meters::UserId).integer().not_null())
                    .col(ColumnDef::new(Meters::UtilityId).integer().not_null())
                    .col(
                        ColumnDef::new(Meters::InstalledAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_meters_user")
                            .from(Meters::Table, Meters::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_meters_utility")
                            .from(Meters::Table, Meters::UtilityId)
                            .to(Utilities::Table, Utilities::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_meters_user")
                    .table(Meters::Table)
                    .col(Meters::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Meters::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Meters {
    Table,
    Id,
    SerialNo,
    UserId,
    UtilityId,
    InstalledAt,
}
