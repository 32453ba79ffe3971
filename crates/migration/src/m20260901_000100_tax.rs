//! Tax fetcher reference tables.

use sea_orm_migration::prelude::*;

use crate::columns::{id, timestamp};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum FederalIncomeTaxes {
    Table,
    Id,
    Year,
    MaritalStatus,
    PayPeriod,
    Over,
    NotOver,
    Plus,
    Percent,
    NonTaxable,
    DateCreated,
    DateUpdated,
}

#[derive(Iden)]
enum Medicare {
    Table,
    Id,
    Year,
    Percent,
    AdditionalPercent,
    Limits,
    DateCreated,
    DateUpdated,
}

#[derive(Iden)]
enum SocialSecurity {
    Table,
    Id,
    Year,
    Percent,
    Limit,
    DateCreated,
    DateUpdated,
}

#[derive(Iden)]
enum TaxWithholdings {
    Table,
    Id,
    Year,
    PayPeriod,
    Amount,
    Kind,
    DateCreated,
    DateUpdated,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FederalIncomeTaxes::Table)
                    .if_not_exists()
                    .col(id(FederalIncomeTaxes::Id))
                    .col(ColumnDef::new(FederalIncomeTaxes::Year).integer().not_null())
                    .col(
                        ColumnDef::new(FederalIncomeTaxes::MaritalStatus)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FederalIncomeTaxes::PayPeriod)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FederalIncomeTaxes::Over).double().not_null())
                    .col(ColumnDef::new(FederalIncomeTaxes::NotOver).double())
                    .col(ColumnDef::new(FederalIncomeTaxes::Plus).double().not_null())
                    .col(ColumnDef::new(FederalIncomeTaxes::Percent).double().not_null())
                    .col(
                        ColumnDef::new(FederalIncomeTaxes::NonTaxable)
                            .double()
                            .not_null(),
                    )
                    .col(timestamp(FederalIncomeTaxes::DateCreated))
                    .col(timestamp(FederalIncomeTaxes::DateUpdated))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-federal_income_taxes-group")
                    .table(FederalIncomeTaxes::Table)
                    .col(FederalIncomeTaxes::Year)
                    .col(FederalIncomeTaxes::MaritalStatus)
                    .col(FederalIncomeTaxes::PayPeriod)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Medicare::Table)
                    .if_not_exists()
                    .col(id(Medicare::Id))
                    .col(
                        ColumnDef::new(Medicare::Year)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Medicare::Percent).double().not_null())
                    .col(
                        ColumnDef::new(Medicare::AdditionalPercent)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Medicare::Limits).json().not_null())
                    .col(timestamp(Medicare::DateCreated))
                    .col(timestamp(Medicare::DateUpdated))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SocialSecurity::Table)
                    .if_not_exists()
                    .col(id(SocialSecurity::Id))
                    .col(
                        ColumnDef::new(SocialSecurity::Year)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(SocialSecurity::Percent).double().not_null())
                    .col(
                        ColumnDef::new(SocialSecurity::Limit)
                            .big_integer()
                            .not_null(),
                    )
                    .col(timestamp(SocialSecurity::DateCreated))
                    .col(timestamp(SocialSecurity::DateUpdated))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TaxWithholdings::Table)
                    .if_not_exists()
                    .col(id(TaxWithholdings::Id))
                    .col(ColumnDef::new(TaxWithholdings::Year).integer().not_null())
                    .col(ColumnDef::new(TaxWithholdings::PayPeriod).string().not_null())
                    .col(ColumnDef::new(TaxWithholdings::Amount).double().not_null())
                    .col(ColumnDef::new(TaxWithholdings::Kind).string().not_null())
                    .col(timestamp(TaxWithholdings::DateCreated))
                    .col(timestamp(TaxWithholdings::DateUpdated))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-tax_withholdings-year-pay_period-kind-unique")
                    .table(TaxWithholdings::Table)
                    .col(TaxWithholdings::Year)
                    .col(TaxWithholdings::PayPeriod)
                    .col(TaxWithholdings::Kind)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TaxWithholdings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SocialSecurity::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Medicare::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FederalIncomeTaxes::Table).to_owned())
            .await?;
        Ok(())
    }
}
