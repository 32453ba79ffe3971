//! Bill-man tables. `owner` is the uuid of the user the row belongs to.

use sea_orm_migration::prelude::*;

use crate::columns::{id, timestamp};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Categories {
    Table,
    Id,
    Owner,
    Name,
    DateCreated,
    DateUpdated,
}

#[derive(Iden)]
enum Bills {
    Table,
    Id,
    Owner,
    Name,
    Amount,
    VaryingAmount,
    PayoffAmount,
    CategoryIds,
    Color,
    DateCreated,
    DateUpdated,
}

#[derive(Iden)]
enum Income {
    Table,
    Id,
    Owner,
    Name,
    Amount,
    VaryingAmount,
    DateCreated,
    DateUpdated,
}

#[derive(Iden)]
enum Occurrences {
    Table,
    Id,
    Owner,
    BillId,
    Amount,
    AmountLeft,
    DueDate,
    Every,
    DateCreated,
    DateUpdated,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(id(Categories::Id))
                    .col(ColumnDef::new(Categories::Owner).string().not_null())
                    .col(ColumnDef::new(Categories::Name).string().not_null())
                    .col(timestamp(Categories::DateCreated))
                    .col(timestamp(Categories::DateUpdated))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Bills::Table)
                    .if_not_exists()
                    .col(id(Bills::Id))
                    .col(ColumnDef::new(Bills::Owner).string().not_null())
                    .col(ColumnDef::new(Bills::Name).string().not_null())
                    .col(ColumnDef::new(Bills::Amount).string().not_null())
                    .col(ColumnDef::new(Bills::VaryingAmount).boolean().not_null())
                    .col(ColumnDef::new(Bills::PayoffAmount).string())
                    .col(ColumnDef::new(Bills::CategoryIds).json().not_null())
                    .col(ColumnDef::new(Bills::Color).string())
                    .col(timestamp(Bills::DateCreated))
                    .col(timestamp(Bills::DateUpdated))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Income::Table)
                    .if_not_exists()
                    .col(id(Income::Id))
                    .col(ColumnDef::new(Income::Owner).string().not_null())
                    .col(ColumnDef::new(Income::Name).string().not_null())
                    .col(ColumnDef::new(Income::Amount).string().not_null())
                    .col(ColumnDef::new(Income::VaryingAmount).boolean().not_null())
                    .col(timestamp(Income::DateCreated))
                    .col(timestamp(Income::DateUpdated))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Occurrences::Table)
                    .if_not_exists()
                    .col(id(Occurrences::Id))
                    .col(ColumnDef::new(Occurrences::Owner).string().not_null())
                    .col(ColumnDef::new(Occurrences::BillId).integer().not_null())
                    .col(ColumnDef::new(Occurrences::Amount).string().not_null())
                    .col(ColumnDef::new(Occurrences::AmountLeft).string().not_null())
                    .col(ColumnDef::new(Occurrences::DueDate).big_integer().not_null())
                    .col(ColumnDef::new(Occurrences::Every).string().not_null())
                    .col(timestamp(Occurrences::DateCreated))
                    .col(timestamp(Occurrences::DateUpdated))
                    .to_owned(),
            )
            .await?;

        for (name, table) in [
            ("idx-categories-owner", Categories::Table.into_iden()),
            ("idx-bills-owner", Bills::Table.into_iden()),
            ("idx-income-owner", Income::Table.into_iden()),
            ("idx-occurrences-owner", Occurrences::Table.into_iden()),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(table)
                        .col(Alias::new("owner"))
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Occurrences::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Income::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Bills::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        Ok(())
    }
}
