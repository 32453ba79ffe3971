use api_types::botw::Elixir;
use sea_orm::{ActiveValue, Condition, entity::prelude::*};

use crate::{
    ResultEngine,
    botw::name_scope,
    resource::Resource,
    util::{from_json, require_name, to_json},
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "elixirs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub image: Option<String>,
    pub effect: String,
    pub description: String,
    pub ingredients: Json,
    pub date_created: i64,
    pub date_updated: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub struct Elixirs;

impl Resource for Elixirs {
    type Item = Elixir;
    type Model = Model;
    type Entity = Entity;
    type ActiveModel = ActiveModel;

    const NAME: &'static str = "elixirs";

    fn id(item: &Elixir) -> Option<i32> {
        item.id
    }

    fn from_model(model: Model) -> ResultEngine<Elixir> {
        Ok(Elixir {
            id: Some(model.id),
            name: model.name,
            image: model.image,
            effect: model.effect,
            description: model.description,
            ingredients: from_json(model.ingredients)?,
            date_created: model.date_created,
            date_updated: model.date_updated,
        })
    }

    fn to_active_model(item: &Elixir) -> ResultEngine<ActiveModel> {
        Ok(ActiveModel {
            name: ActiveValue::Set(item.name.trim().to_string()),
            image: ActiveValue::Set(item.image.clone()),
            effect: ActiveValue::Set(item.effect.clone()),
            description: ActiveValue::Set(item.description.clone()),
            ingredients: ActiveValue::Set(to_json(&item.ingredients)?),
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

    fn validate(item: &Elixir) -> ResultEngine<()> {
        require_name(&item.name, "elixir")
    }

    fn conflict_scope(item: &Elixir) -> Option<Condition> {
        Some(name_scope(&item.name))
    }
}
