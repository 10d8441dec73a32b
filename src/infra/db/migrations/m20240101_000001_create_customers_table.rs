//! Migration: Create customers table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Customers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Customers::Name).string().not_null())
                    .col(ColumnDef::new(Customers::Surname).string().not_null())
                    .col(ColumnDef::new(Customers::Email).string().not_null())
                    .col(ColumnDef::new(Customers::DateOfBirth).date().not_null())
                    .col(
                        ColumnDef::new(Customers::PremiumUser)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Customers::Username).string().not_null())
                    .col(ColumnDef::new(Customers::Address).string().not_null())
                    .col(ColumnDef::new(Customers::PostalCode).string().not_null())
                    .col(ColumnDef::new(Customers::City).string().not_null())
                    .col(ColumnDef::new(Customers::Country).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Lookups scan by username and email; neither is unique
        manager
            .create_index(
                Index::create()
                    .name("idx_customers_username")
                    .table(Customers::Table)
                    .col(Customers::Username)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_customers_email")
                    .table(Customers::Table)
                    .col(Customers::Email)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Customers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Customers {
    Table,
    Id,
    Name,
    Surname,
    Email,
    DateOfBirth,
    PremiumUser,
    Username,
    Address,
    PostalCode,
    City,
    Country,
}
