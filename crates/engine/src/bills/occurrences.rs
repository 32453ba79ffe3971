//! Due instances of a bill.

use api_types::bills::Occurrence;
use sea_orm::{ActiveValue, DatabaseTransaction, entity::prelude::*};

use crate::{
    EngineError, ResultEngine,
    bills::{self, ensure_owned, validate_amount},
    resource::Resource,
    util::parse_column,
};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "occurrences")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub owner: String,
    pub bill_id: i32,
    pub amount: String,
    pub amount_left: String,
    pub due_date: i64,
    pub every: String,
    pub date_created: i64,
    pub date_updated: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub struct Occurrences;

impl Resource for Occurrences {
    type Item = Occurrence;
    type Model = Model;
    type Entity = Entity;
    type ActiveModel = ActiveModel;

    const NAME: &'static str = "occurrences";

    fn id(item: &Occurrence) -> Option<i32> {
        item.id
    }

    fn from_model(model: Model) -> ResultEngine<Occurrence> {
        Ok(Occurrence {
            id: Some(model.id),
            owner: model.owner,
            bill_id: model.bill_id,
            amount: model.amount,
            amount_left: model.amount_left,
            due_date: model.due_date,
            every: parse_column(&model.every)?,
            date_created: model.date_created,
            date_updated: model.date_updated,
        })
    }

    fn to_active_model(item: &Occurrence) -> ResultEngine<ActiveModel> {
        Ok(ActiveModel {
            owner: ActiveValue::Set(item.owner.clone()),
            bill_id: ActiveValue::Set(item.bill_id),
            amount: ActiveValue::Set(item.amount.clone()),
            amount_left: ActiveValue::Set(item.amount_left.clone()),
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

    fn set_owner(item: &mut Occurrence, owner: &str) {
        item.owner = owner.to_string();
    }

    fn owner_of(item: &Occurrence) -> Option<&str> {
        Some(&item.owner)
    }

    fn validate(item: &Occurrence) -> ResultEngine<()> {
        if item.bill_id <= 0 {
            return Err(EngineError::InvalidField("billId must be > 0".to_string()));
        }
        validate_amount(&item.amount, "amount")?;
        validate_amount(&item.amount_left, "amountLeft")
    }

    async fn check_references(item: &Occurrence, tx: &DatabaseTransaction) -> ResultEngine<()> {
        ensure_owned::<bills::bills::Entity>(
            tx,
            bills::bills::Column::Id,
            bills::bills::Column::Owner,
            [item.bill_id],
            &item.owner,
            "bills",
        )
        .await
    }
}
