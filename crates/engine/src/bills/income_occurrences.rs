//! Expected payments from an income source.

use api_types::bills::IncomeOccurrence;
use sea_orm::{ActiveValue, DatabaseTransaction, entity::prelude::*};

use crate::{
    EngineError, ResultEngine,
    bills::{ensure_owned, income, validate_amount},
    resource::Resource,
    util::parse_column,
};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "income_occurrences")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub owner: String,
    pub income_id: i32,
    pub amount: String,
    pub due_date: i64,
    pub every: String,
    pub date_created: i64,
    pub date_updated: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub struct IncomeOccurrences;

impl Resource for IncomeOccurrences {
    type Item = IncomeOccurrence;
    type Model = Model;
    type Entity = Entity;
    type ActiveModel = ActiveModel;

    const NAME: &'static str = "incomeOccurrences";

    fn id(item: &IncomeOccurrence) -> Option<i32> {
        item.id
    }

    fn from_model(model: Model) -> ResultEngine<IncomeOccurrence> {
        Ok(IncomeOccurrence {
            id: Some(model.id),
            owner: model.owner,
            income_id: model.income_id,
            amount: model.amount,
            due_date: model.due_date,
            every: parse_column(&model.every)?,
            date_created: model.date_created,
            date_updated: model.date_updated,
        })
    }

    fn to_active_model(item: &IncomeOccurrence) -> ResultEngine<ActiveModel> {
        Ok(ActiveModel {
            owner: ActiveValue::Set(item.owner.clone()),
            income_id: ActiveValue::Set(item.income_id),
            amount: ActiveValue::Set(item.amount.clone()),
            due_date: ActiveValue::Set(item.due_date),
            every: ActiveValue::Set(item.every.as_str().to_string()),
            ..Default::default()
        })
    }

    fn id_column() -> Column {
        Column::Id
    }

    fn date_created_column() -> Column {
        Column::DateCreated
    }

    fn date_updated_column() -> Column {
        Column::DateUpdated
    }

    fn owner_column() -> Option<Column> {
        Some(Column::Owner)
    }

    fn set_owner(item: &mut IncomeOccurrence, owner: &str) {
        item.owner = owner.to_string();
    }

    fn owner_of(item: &IncomeOccurrence) -> Option<&str> {
        Some(&item.owner)
    }

    fn validate(item: &IncomeOccurrence) -> ResultEngine<()> {
        if item.income_id <= 0 {
            return Err(EngineError::InvalidField("incomeId must be > 0".to_string()));
        }
        validate_amount(&item.amount, "amount")
    }

    async fn check_references(
        item: &IncomeOccurrence,
        tx: &DatabaseTransaction,
    ) -> ResultEngine<()> {
        ensure_owned::<income::Entity>(
            tx,
            income::Column::Id,
            income::Column::Owner,
            [item.income_id],
            &item.owner,
            "income",
        )
        .await
    }
}
