//! Migration to create carriers table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Carriers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Carriers::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Carriers::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Carriers::Dba)
                            .string_len(100)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Carriers::Status)
                            .string_len(20)
                            .not_null()
                            .default("Active"),
                    )
                    .col(ColumnDef::new(Carriers::PhysicalAddress).text().not_null())
                    .col(ColumnDef::new(Carriers::MailingAddress).text().not_null())
                    .col(ColumnDef::new(Carriers::Insurance).text().not_null())
                    .col(ColumnDef::new(Carriers::IdentificationCodes).text().not_null())
                    .col(
                        ColumnDef::new(Carriers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Carriers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Sorting by name is the only non-key sort
        manager
            .create_index(
                Index::create()
                    .name("idx_carriers_name")
                    .table(Carriers::Table)
                    .col(Carriers::Name)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Carriers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Carriers {
    Table,
    Id,
    Name,
    Dba,
    Status,
    PhysicalAddress,
    MailingAddress,
    Insurance,
    IdentificationCodes,
    CreatedAt,
    UpdatedAt,
}
