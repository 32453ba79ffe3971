//! Income sources, owned per user.

use api_types::bills::Income;
use sea_orm::{ActiveValue, Condition, entity::prelude::*};

use crate::{
    ResultEngine,
    bills::validate_amount,
    resource::Resource,
    util::{name_key, require_name},
};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "income")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub owner: String,
    pub name: String,
    pub amount: String,
    pub varying_amount: bool,
    pub date_created: i64,
    pub date_updated: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub struct IncomeSources;

impl Resource for IncomeSources {
    type Item = Income;
    type Model = Model;
    type Entity = Entity;
    type ActiveModel = ActiveModel;

    const NAME: &'static str = "income";

    fn id(item: &Income) -> Option<i32> {
        item.id
    }

    fn from_model(model: Model) -> ResultEngine<Income> {
        Ok(Income {
            id: Some(model.id),
            owner: model.owner,
            name: model.name,
            amount: model.amount,
            varying_amount: model.varying_amount,
            date_created: model.date_created,
            date_updated: model.date_updated,
        })
    }

    fn to_active_model(item: &Income) -> ResultEngine<ActiveModel> {
        Ok(ActiveModel {
            owner: ActiveValue::Set(item.owner.clone()),
            name: ActiveValue::Set(item.name.trim().to_string()),
            amount: ActiveValue::Set(item.amount.clone()),
            varying_amount: ActiveValue::Set(item.varying_amount),
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

    fn set_owner(item: &mut Income, owner: &str) {
        item.owner = owner.to_string();
    }

    fn owner_of(item: &Income) -> Option<&str> {
        Some(&item.owner)
    }

    fn validate(item: &Income) -> ResultEngine<()> {
        require_name(&item.name, "income")?;
        validate_amount(&item.amount, "amount")
    }

    fn conflict_scope(item: &Income) -> Option<Condition> {
        Some(Condition::all().add(Column::Owner.eq(item.owner.as_str())))
    }

    fn conflicts(item: &Income, existing: &Income) -> bool {
        name_key(&item.name) == name_key(&existing.name)
    }
}
