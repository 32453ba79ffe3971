//! Game reference tables. Names are unique; the engine additionally compares
//! them case-insensitively.

use sea_orm_migration::prelude::*;

use crate::columns::{id, timestamp};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Images {
    Table,
    Src,
    Width,
    Height,
}

#[derive(Iden)]
enum Effects {
    Table,
    Description,
    Timeout,
}

#[derive(Iden)]
enum Critters {
    Table,
}

#[derive(Iden)]
enum Ingredients {
    Table,
}

#[derive(Iden)]
enum Elixirs {
    Table,
}

#[derive(Iden)]
enum MonsterParts {
    Table,
}

#[derive(Iden)]
enum CookingPotFoods {
    Table,
}

#[derive(Iden)]
enum RoastedFoods {
    Table,
}

#[derive(Iden)]
enum FrozenFoods {
    Table,
}

#[derive(Iden)]
enum OtherFoods {
    Table,
    Images,
    Method,
}

/// Columns reused across the game tables.
#[derive(Iden)]
enum Common {
    Id,
    Name,
    Image,
    Effect,
    Hearts,
    Duration,
    Description,
    Ingredients,
    DateCreated,
    DateUpdated,
}

fn game_table<T: IntoIden + 'static>(table: T) -> TableCreateStatement {
    Table::create()
        .table(table)
        .if_not_exists()
        .col(id(Common::Id))
        .col(ColumnDef::new(Common::Name).string().not_null().unique_key())
        .to_owned()
}

fn with_timestamps(mut table: TableCreateStatement) -> TableCreateStatement {
    table
        .col(timestamp(Common::DateCreated))
        .col(timestamp(Common::DateUpdated))
        .to_owned()
}

/// Shape shared by the cooking-pot, roasted and frozen food tables.
fn food_table<T: IntoIden + 'static>(table: T) -> TableCreateStatement {
    with_timestamps(
        game_table(table)
            .col(ColumnDef::new(Common::Image).string())
            .col(ColumnDef::new(Common::Hearts).double())
            .col(ColumnDef::new(Common::Effect).string())
            .col(ColumnDef::new(Common::Description).string().not_null())
            .col(ColumnDef::new(Common::Ingredients).json().not_null())
            .to_owned(),
    )
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let tables = [
            with_timestamps(
                game_table(Images::Table)
                    .col(ColumnDef::new(Images::Src).string().not_null())
                    .col(ColumnDef::new(Images::Width).integer().not_null())
                    .col(ColumnDef::new(Images::Height).integer().not_null())
                    .to_owned(),
            ),
            with_timestamps(
                game_table(Effects::Table)
                    .col(ColumnDef::new(Effects::Description).string().not_null())
                    .col(ColumnDef::new(Effects::Timeout).string())
                    .to_owned(),
            ),
            with_timestamps(
                game_table(Critters::Table)
                    .col(ColumnDef::new(Common::Image).string())
                    .col(ColumnDef::new(Common::Effect).string())
                    .col(ColumnDef::new(Common::Hearts).double())
                    .col(ColumnDef::new(Common::Duration).string())
                    .to_owned(),
            ),
            with_timestamps(
                game_table(Ingredients::Table)
                    .col(ColumnDef::new(Common::Image).string())
                    .col(ColumnDef::new(Common::Hearts).double())
                    .col(ColumnDef::new(Common::Effect).string())
                    .col(ColumnDef::new(Common::Duration).string())
                    .to_owned(),
            ),
            with_timestamps(
                game_table(Elixirs::Table)
                    .col(ColumnDef::new(Common::Image).string())
                    .col(ColumnDef::new(Common::Effect).string().not_null())
                    .col(ColumnDef::new(Common::Description).string().not_null())
                    .col(ColumnDef::new(Common::Ingredients).json().not_null())
                    .to_owned(),
            ),
            with_timestamps(
                game_table(MonsterParts::Table)
                    .col(ColumnDef::new(Common::Duration).string().not_null())
                    .to_owned(),
            ),
            food_table(CookingPotFoods::Table),
            food_table(RoastedFoods::Table),
            food_table(FrozenFoods::Table),
            with_timestamps(
                game_table(OtherFoods::Table)
                    .col(ColumnDef::new(Common::Image).string())
                    .col(ColumnDef::new(OtherFoods::Images).json().not_null())
                    .col(ColumnDef::new(Common::Description).string().not_null())
                    .col(ColumnDef::new(Common::Ingredients).json().not_null())
                    .col(ColumnDef::new(OtherFoods::Method).string().not_null())
                    .to_owned(),
            ),
        ];

        for table in tables {
            manager.create_table(table).await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let tables = [
            OtherFoods::Table.into_iden(),
            FrozenFoods::Table.into_iden(),
            RoastedFoods::Table.into_iden(),
            CookingPotFoods::Table.into_iden(),
            MonsterParts::Table.into_iden(),
            Elixirs::Table.into_iden(),
            Ingredients::Table.into_iden(),
            Critters::Table.into_iden(),
            Effects::Table.into_iden(),
            Images::Table.into_iden(),
        ];
        for table in tables {
            manager
                .drop_table(Table::drop().table(table).to_owned())
                .await?;
        }
        Ok(())
    }
}
