//! Expected income payments, owned like the other bill-man tables.

use sea_orm_migration::prelude::*;

use crate::columns::{id, timestamp};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum IncomeOccurrences {
    Table,
    Id,
    Owner,
    IncomeId,
    Amount,
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
                    .table(IncomeOccurrences::Table)
                    .if_not_exists()
                    .col(id(IncomeOccurrences::Id))
                    .col(ColumnDef::new(IncomeOccurrences::Owner).string().not_null())
                    .col(ColumnDef::new(IncomeOccurrences::IncomeId).integer().not_null())
                    .col(ColumnDef::new(IncomeOccurrences::Amount).string().not_null())
                    .col(ColumnDef::new(IncomeOccurrences::DueDate).big_integer().not_null())
                    .col(ColumnDef::new(IncomeOccurrences::Every).string().not_null())
                    .col(timestamp(IncomeOccurrences::DateCreated))
                    .col(timestamp(IncomeOccurrences::DateUpdated))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-income-occurrences-owner")
                    .table(IncomeOccurrences::Table)
                    .col(IncomeOccurrences::Owner)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(IncomeOccurrences::Table).to_owned())
            .await
    }
}
