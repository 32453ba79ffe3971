use api_types::botw::Ingredient;
use sea_orm::{ActiveValue, Condition, entity::prelude::*};

use crate::{
    EngineError, ResultEngine, botw::name_scope, resource::Resource, util::require_name,
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ingredients")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub image: Option<String>,
    pub hearts: Option<f64>,
    pub effect: Option<String>,
    pub duration: Option<String>,
    pub date_created: i64,
    pub date_updated: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Hearts restored may be absent, never negative.
pub(crate) fn validate_hearts(hearts: Option<f64>) -> ResultEngine<()> {
    match hearts {
        Some(value) if !value.is_finite() || value < 0.0 => Err(EngineError::InvalidField(
            "hearts must be >= 0".to_string(),
        )),
        _ => Ok(()),
    }
}

pub struct Ingredients;

impl Resource for Ingredients {
    type Item = Ingredient;
    type Model = Model;
    type Entity = Entity;
    type ActiveModel = ActiveModel;

    const NAME: &'static str = "ingredients";

    fn id(item: &Ingredient) -> Option<i32> {
        item.id
    }

    fn from_model(model: Model) -> ResultEngine<Ingredient> {
        Ok(Ingredient {
            id: Some(model.id),
            name: model.name,
            image: model.image,
            hearts: model.hearts,
            effect: model.effect,
            duration: model.duration,
            date_created: model.date_created,
            date_updated: model.date_updated,
        })
    }

    fn to_active_model(item: &Ingredient) -> ResultEngine<ActiveModel> {
        Ok(ActiveModel {
            name: ActiveValue::Set(item.name.trim().to_string()),
            image: ActiveValue::Set(item.image.clone()),
            hearts: ActiveValue::Set(item.hearts),
            effect: ActiveValue::Set(item.effect.clone()),
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

    fn validate(item: &Ingredient) -> ResultEngine<()> {
        require_name(&item.name, "ingredient")?;
        validate_hearts(item.hearts)
    }

    fn conflict_scope(item: &Ingredient) -> Option<Condition> {
        Some(name_scope(&item.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hearts_are_optional_but_not_negative() {
        assert!(validate_hearts(None).is_ok());
        assert!(validate_hearts(Some(0.25)).is_ok());
        assert!(validate_hearts(Some(-1.0)).is_err());
        assert!(validate_hearts(Some(f64::INFINITY)).is_err());
    }
}
