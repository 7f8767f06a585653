//! Create bills table

use sea_orm_migration::prelude::*;

use super::m20260101_000003_create_meters::Meters;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bills::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bills::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bills::MeterId).integer().not_null())
                    .col(ColumnDef::new(Bills::Period).string().not_null())
                    .col(
                        ColumnDef::new(Bills::Amount)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Bills::DueDate).date().not_null())
                    .col(
                        ColumnDef::new(Bills::Status)
                            .string()
                            .not_null()
                            .default("unpaid"),
                    )
                    .col(
                        ColumnDef::new(Bills::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bills_meter")
                            .from(Bills::Table, Bills::MeterId)
                            .to(Meters::Table, Meters::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index for dashboard queries filtering by status
        manager
            .create_index(
                Index::create()
                    .name("idx_bills_status")
                    .table(Bills::Table)
                    .col(Bills::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bills_meter")
                    .table(Bills::Table)
                    .col(Bills::MeterId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bills::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Bills {
    Table,
    Id,
    MeterId,
    Period,
    Amount,
    DueDate,
    Status,
    CreatedAt,
}
