use api_types::botw::Effect;
use sea_orm::{ActiveValue, Condition, entity::prelude::*};

use crate::{ResultEngine, botw::name_scope, resource::Resource, util::require_name};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "effects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: String,
    pub timeout: Option<String>,
    pub date_created: i64,
    pub date_updated: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub struct Effects;

impl Resource for Effects {
    type Item = Effect;
    type Model = Model;
    type Entity = Entity;
    type ActiveModel = ActiveModel;

    const NAME: &'static str = "effects";

    fn id(item: &Effect) -> Option<i32> {
        item.id
    }

    fn from_model(model: Model) -> ResultEngine<Effect> {
        Ok(Effect {
            id: Some(model.id),
            name: model.name,
            description: model.description,
            timeout: model.timeout,
            date_created: model.date_created,
            date_updated: model.date_updated,
        })
    }

    fn to_active_model(item: &Effect) -> ResultEngine<ActiveModel> {
        Ok(ActiveModel {
            name: ActiveValue::Set(item.name.trim().to_string()),
            description: ActiveValue::Set(item.description.clone()),
            timeout: ActiveValue::Set(item.timeout.clone()),
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

    fn validate(item: &Effect) -> ResultEngine<()> {
        require_name(&item.name, "effect")
    }

    fn conflict_scope(item: &Effect) -> Option<Condition> {
        Some(name_scope(&item.name))
    }
}
