use api_types::botw::OtherFood;
use sea_orm::{ActiveValue, Condition, entity::prelude::*};

use crate::{
    ResultEngine,
    botw::name_scope,
    resource::Resource,
    util::{from_json, require_name, to_json},
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "other_foods")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub image: Option<String>,
    pub images: Json,
    pub description: String,
    pub ingredients: Json,
    pub method: String,
    pub date_created: i64,
    pub date_updated: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub struct OtherFoods;

impl Resource for OtherFoods {
    type Item = OtherFood;
    type Model = Model;
    type Entity = Entity;
    type ActiveModel = ActiveModel;

    const NAME: &'static str = "otherFoods";

    fn id(item: &OtherFood) -> Option<i32> {
        item.id
    }

    fn from_model(model: Model) -> ResultEngine<OtherFood> {
        Ok(OtherFood {
            id: Some(model.id),
            name: model.name,
            image: model.image,
            images: from_json(model.images)?,
            description: model.description,
            ingredients: from_json(model.ingredients)?,
            method: model.method,
            date_created: model.date_created,
            date_updated: model.date_updated,
        })
    }

    fn to_active_model(item: &OtherFood) -> ResultEngine<ActiveModel> {
        Ok(ActiveModel {
            name: ActiveValue::Set(item.name.trim().to_string()),
            image: ActiveValue::Set(item.image.clone()),
            images: ActiveValue::Set(to_json(&item.images)?),
            description: ActiveValue::Set(item.description.clone()),
            ingredients: ActiveValue::Set(to_json(&item.ingredients)?),
            method: ActiveValue::Set(item.method.clone()),
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

    fn validate(item: &OtherFood) -> ResultEngine<()> {
        require_name(&item.name, "food")
    }

    fn conflict_scope(item: &OtherFood) -> Option<Condition> {
        Some(name_scope(&item.name))
    }
}
