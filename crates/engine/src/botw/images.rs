use api_types::botw::Image;
use sea_orm::{ActiveValue, Condition, entity::prelude::*};

use crate::{
    EngineError, ResultEngine, botw::name_scope, resource::Resource, util::require_name,
};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "images")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub src: String,
    pub width: i32,
    pub height: i32,
    pub date_created: i64,
    pub date_updated: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub struct Images;

impl Resource for Images {
    type Item = Image;
    type Model = Model;
    type Entity = Entity;
    type ActiveModel = ActiveModel;

    const NAME: &'static str = "images";

    fn id(item: &Image) -> Option<i32> {
        item.id
    }

    fn from_model(model: Model) -> ResultEngine<Image> {
        Ok(Image {
            id: Some(model.id),
            name: model.name,
            src: model.src,
            width: model.width,
            height: model.height,
            date_created: model.date_created,
            date_updated: model.date_updated,
        })
    }

    fn to_active_model(item: &Image) -> ResultEngine<ActiveModel> {
        Ok(ActiveModel {
            name: ActiveValue::Set(item.name.trim().to_string()),
            src: ActiveValue::Set(item.src.clone()),
            width: ActiveValue::Set(item.width),
            height: ActiveValue::Set(item.height),
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

    fn validate(item: &Image) -> ResultEngine<()> {
        require_name(&item.name, "image")?;
        if item.src.trim().is_empty() {
            return Err(EngineError::InvalidField(
                "image src must not be empty".to_string(),
            ));
        }
        if item.width < 0 || item.height < 0 {
            return Err(EngineError::InvalidField(
                "image dimensions must be >= 0".to_string(),
            ));
        }
        Ok(())
    }

    fn conflict_scope(item: &Image) -> Option<Condition> {
        Some(name_scope(&item.name))
    }
}
