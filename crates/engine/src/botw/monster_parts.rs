use api_types::botw::MonsterPart;
use sea_orm::{ActiveValue, Condition, entity::prelude::*};

use crate::{ResultEngine, botw::name_scope, resource::Resource, util::require_name};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "monster_parts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub duration: String,
    pub date_created: i64,
    pub date_updated: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub struct MonsterParts;

impl Resource for MonsterParts {
    type Item = MonsterPart;
    type Model = Model;
    type Entity = Entity;
    type ActiveModel = ActiveModel;

    const NAME: &'static str = "monsterParts";

    fn id(item: &MonsterPart) -> Option<i32> {
        item.id
    }

    fn from_model(model: Model) -> ResultEngine<MonsterPart> {
        Ok(MonsterPart {
            id: Some(model.id),
            name: model.name,
            duration: model.duration,
            date_created: model.date_created,
            date_updated: model.date_updated,
        })
    }

    fn to_active_model(item: &MonsterPart) -> ResultEngine<ActiveModel> {
        Ok(ActiveModel {
            name: ActiveValue::Set(item.name.trim().to_string()),
            duration: ActiveValue::Set(item.duration.clone()),
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

    fn validate(item: &MonsterPart) -> ResultEngine<()> {
        require_name(&item.name, "monster part")
    }

    fn conflict_scope(item: &MonsterPart) -> Option<Condition> {
        Some(name_scope(&item.name))
    }
}
