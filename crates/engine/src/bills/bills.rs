//! Recurring bills, owned per user.

use api_types::bills::Bill;
use sea_orm::{ActiveValue, Condition, DatabaseTransaction, entity::prelude::*};

use crate::{
    ResultEngine,
    bills::{categories, ensure_owned, validate_amount},
    resource::Resource,
    util::{from_json, name_key, require_name, to_json},
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "bills")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub owner: String,
    pub name: String,
    pub amount: String,
    pub varying_amount: bool,
    pub payoff_amount: Option<String>,
    pub category_ids: Json,
    pub color: Option<String>,
    pub date_created: i64,
    pub date_updated: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub struct Bills;

impl Resource for Bills {
    type Item = Bill;
    type Model = Model;
    type Entity = Entity;
    type ActiveModel = ActiveModel;

    const NAME: &'static str = "bills";

    fn id(item: &Bill) -> Option<i32> {
        item.id
    }

    fn from_model(model: Model) -> ResultEngine<Bill> {
        Ok(Bill {
            id: Some(model.id),
            owner: model.owner,
            name: model.name,
            amount: model.amount,
            varying_amount: model.varying_amount,
            payoff_amount: model.payoff_amount,
            category_ids: from_json(model.category_ids)?,
            color: model.color,
            date_created: model.date_created,
            date_updated: model.date_updated,
        })
    }

    fn to_active_model(item: &Bill) -> ResultEngine<ActiveModel> {
        Ok(ActiveModel {
            owner: ActiveValue::Set(item.owner.clone()),
            name: ActiveValue::Set(item.name.trim().to_string()),
            amount: ActiveValue::Set(item.amount.clone()),
            varying_amount: ActiveValue::Set(item.varying_amount),
            payoff_amount: ActiveValue::Set(item.payoff_amount.clone()),
            category_ids: ActiveValue::Set(to_json(&item.category_ids)?),
            color: ActiveValue::Set(item.color.clone()),
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

    fn set_owner(item: &mut Bill, owner: &str) {
        item.owner = owner.to_string();
    }

    fn owner_of(item: &Bill) -> Option<&str> {
        Some(&item.owner)
    }

    fn validate(item: &Bill) -> ResultEngine<()> {
        require_name(&item.name, "bill")?;
        validate_amount(&item.amount, "amount")?;
        if let Some(payoff) = item.payoff_amount.as_deref() {
            validate_amount(payoff, "payoffAmount")?;
        }
        Ok(())
    }

    async fn check_references(item: &Bill, tx: &DatabaseTransaction) -> ResultEngine<()> {
        ensure_owned::<categories::Entity>(
            tx,
            categories::Column::Id,
            categories::Column::Owner,
            item.category_ids.iter().copied(),
            &item.owner,
            "categories",
        )
        .await
    }

    fn conflict_scope(item: &Bill) -> Option<Condition> {
        Some(Condition::all().add(Column::Owner.eq(item.owner.as_str())))
    }

    fn conflicts(item: &Bill, existing: &Bill) -> bool {
        name_key(&item.name) == name_key(&existing.name)
    }
}
