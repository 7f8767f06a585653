//! Create utilities table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Utilities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Utilities::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Utilities::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Utilities::Unit).string().not_null())
                    .col(
                        ColumnDef::new(Utilities::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Utilities::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Utilities {
    Table,
    Id,
    Name,
    Unit,
    CreatedAt,
}
