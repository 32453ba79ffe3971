//! Withholding allowance amounts per (year, pay period, type).

use api_types::tax::TaxWithholding;
use sea_orm::{ActiveValue, Condition, entity::prelude::*};

use crate::{EngineError, ResultEngine, resource::Resource, util::parse_column};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tax_withholdings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub year: i32,
    pub pay_period: String,
    pub amount: f64,
    pub kind: String,
    pub date_created: i64,
    pub date_updated: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub struct TaxWithholdings;

impl Resource for TaxWithholdings {
    type Item = TaxWithholding;
    type Model = Model;
    type Entity = Entity;
    type ActiveModel = ActiveModel;

    const NAME: &'static str = "taxWithholding";

    fn id(item: &TaxWithholding) -> Option<i32> {
        item.id
    }

    fn from_model(model: Model) -> ResultEngine<TaxWithholding> {
        Ok(TaxWithholding {
            id: Some(model.id),
            year: model.year,
            pay_period: parse_column(&model.pay_period)?,
            amount: model.amount,
            kind: parse_column(&model.kind)?,
            date_created: model.date_created,
            date_updated: model.date_updated,
        })
    }

    fn to_active_model(item: &TaxWithholding) -> ResultEngine<ActiveModel> {
        Ok(ActiveModel {
            year: ActiveValue::Set(item.year),
            pay_period: ActiveValue::Set(item.pay_period.as_str().to_string()),
            amount: ActiveValue::Set(item.amount),
            kind: ActiveValue::Set(item.kind.as_str().to_string()),
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

    fn validate(item: &TaxWithholding) -> ResultEngine<()> {
        if item.year <= 0 {
            return Err(EngineError::InvalidField("year must be > 0".to_string()));
        }
        if !item.amount.is_finite() || item.amount < 0.0 {
            return Err(EngineError::InvalidField("amount must be >= 0".to_string()));
        }
        Ok(())
    }

    fn conflict_scope(item: &TaxWithholding) -> Option<Condition> {
        Some(
            Condition::all()
                .add(Column::Year.eq(item.year))
                .add(Column::PayPeriod.eq(item.pay_period.as_str()))
                .add(Column::Kind.eq(item.kind.as_str())),
        )
    }
}
