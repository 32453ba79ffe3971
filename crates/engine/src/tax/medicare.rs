//! Medicare rates, one row per year. Looked up by year.

use api_types::tax::Medicare;
use sea_orm::{ActiveValue, Condition, entity::prelude::*};

use crate::{
    EngineError, ResultEngine,
    resource::Resource,
    util::{from_json, to_json},
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "medicare")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub year: i32,
    pub percent: f64,
    pub additional_percent: f64,
    /// `[{"maritalStatus": .., "amount": ..}]`
    pub limits: Json,
    pub date_created: i64,
    pub date_updated: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub struct MedicareRates;

impl Resource for MedicareRates {
    type Item = Medicare;
    type Model = Model;
    type Entity = Entity;
    type ActiveModel = ActiveModel;

    const NAME: &'static str = "medicare";

    fn id(item: &Medicare) -> Option<i32> {
        item.id
    }

    fn from_model(model: Model) -> ResultEngine<Medicare> {
        Ok(Medicare {
            id: Some(model.id),
            year: model.year,
            percent: model.percent,
            additional_percent: model.additional_percent,
            limits: from_json(model.limits)?,
            date_created: model.date_created,
            date_updated: model.date_updated,
        })
    }

    fn to_active_model(item: &Medicare) -> ResultEngine<ActiveModel> {
        Ok(ActiveModel {
            year: ActiveValue::Set(item.year),
            percent: ActiveValue::Set(item.percent),
            additional_percent: ActiveValue::Set(item.additional_percent),
            limits: ActiveValue::Set(to_json(&item.limits)?),
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

    fn delete_column() -> Column {
        Column::Year
    }

    fn validate(item: &Medicare) -> ResultEngine<()> {
        if item.year <= 0 {
            return Err(EngineError::InvalidField("year must be > 0".to_string()));
        }
        for percent in [item.percent, item.additional_percent] {
            if !(0.0..=100.0).contains(&percent) {
                return Err(EngineError::InvalidField(
                    "percent must be between 0 and 100".to_string(),
                ));
            }
        }
        if item.limits.iter().any(|limit| limit.amount < 0) {
            return Err(EngineError::InvalidField(
                "limit amount must be >= 0".to_string(),
            ));
        }
        Ok(())
    }

    fn conflict_scope(item: &Medicare) -> Option<Condition> {
        Some(Condition::all().add(Column::Year.eq(item.year)))
    }
}
