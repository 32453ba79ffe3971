use api_types::botw::Critter;
use sea_orm::{ActiveValue, Condition, entity::prelude::*};

use crate::{
    ResultEngine,
    botw::{ingredients::validate_hearts, name_scope},
    resource::Resource,
    util::require_name,
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "critters")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub image: Option<String>,
    pub effect: Option<String>,
    pub hearts: Option<f64>,
    pub duration: Option<String>,
    pub date_created: i64,
    pub date_updated: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub struct Critters;

impl Resource for Critters {
    type Item = Critter;
    type Model = Model;
    type Entity = Entity;
    type ActiveModel = ActiveModel;

    const NAME: &'static str = "critters";

    fn id(item: &Critter) -> Option<i32> {
        item.id
    }

    fn from_model(model: Model) -> ResultEngine<Critter> {
        Ok(Critter {
            id: Some(model.id),
            name: model.name,
            image: model.image,
            effect: model.effect,
            hearts: model.hearts,
            duration: model.duration,
            date_created: model.date_created,
            date_updated: model.date_updated,
        })
    }

    fn to_active_model(item: &Critter) -> ResultEngine<ActiveModel> {
        Ok(ActiveModel {
            name: ActiveValue::Set(item.name.trim().to_string()),
            image: ActiveValue::Set(item.image.clone()),
            effect: ActiveValue::Set(item.effect.clone()),
            hearts: ActiveValue::Set(item.hearts),
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

    fn validate(item: &Critter) -> ResultEngine<()> {
        require_name(&item.name, "critter")?;
        validate_hearts(item.hearts)
    }

    fn conflict_scope(item: &Critter) -> Option<Condition> {
        Some(name_scope(&item.name))
    }
}
