//! Social Security rate and wage base, one row per year.

use api_types::tax::SocialSecurity;
use sea_orm::{ActiveValue, Condition, entity::prelude::*};

use crate::{EngineError, ResultEngine, resource::Resource};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "social_security")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub year: i32,
    pub percent: f64,
    pub limit: i64,
    pub date_created: i64,
    pub date_updated: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub struct SocialSecurityRates;

impl Resource for SocialSecurityRates {
    type Item = SocialSecurity;
    type Model = Model;
    type Entity = Entity;
    type ActiveModel = ActiveModel;

    const NAME: &'static str = "socialSecurity";

    fn id(item: &SocialSecurity) -> Option<i32> {
        item.id
    }

    fn from_model(model: Model) -> ResultEngine<SocialSecurity> {
        Ok(SocialSecurity {
            id: Some(model.id),
            year: model.year,
            percent: model.percent,
            limit: model.limit,
            date_created: model.date_created,
            date_updated: model.date_updated,
        })
    }

    fn to_active_model(item: &SocialSecurity) -> ResultEngine<ActiveModel> {
        Ok(ActiveModel {
            year: ActiveValue::Set(item.year),
            percent: ActiveValue::Set(item.percent),
            limit: ActiveValue::Set(item.limit),
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

    fn get_column() -> Column {
        Column::Year
    }

    fn validate(item: &SocialSecurity) -> ResultEngine<()> {
        if item.year <= 0 {
            return Err(EngineError::InvalidField("year must be > 0".to_string()));
        }
        if !(0.0..=100.0).contains(&item.percent) {
            return Err(EngineError::InvalidField(
                "percent must be between 0 and 100".to_string(),
            ));
        }
        if item.limit < 0 {
            return Err(EngineError::InvalidField("limit must be >= 0".to_string()));
        }
        Ok(())
    }

    fn conflict_scope(item: &SocialSecurity) -> Option<Condition> {
        Some(Condition::all().add(Column::Year.eq(item.year)))
    }
}
