//! Federal income tax withholding brackets.
//!
//! Brackets are grouped by (year, marital status, pay period). Inside a
//! group the `[over, not_over)` ranges must not intersect; an absent
//! `not_over` is an unbounded top bracket.

use api_types::tax::FederalIncomeTax;
use sea_orm::{ActiveValue, Condition, entity::prelude::*};

use crate::{
    EngineError, ResultEngine,
    resource::Resource,
    util::parse_column,
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "federal_income_taxes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub year: i32,
    pub marital_status: String,
    pub pay_period: String,
    pub over: f64,
    pub not_over: Option<f64>,
    pub plus: f64,
    pub percent: f64,
    pub non_taxable: f64,
    pub date_created: i64,
    pub date_updated: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub struct FederalIncomeTaxes;

impl Resource for FederalIncomeTaxes {
    type Item = FederalIncomeTax;
    type Model = Model;
    type Entity = Entity;
    type ActiveModel = ActiveModel;

    const NAME: &'static str = "federalIncomeTax";

    fn id(item: &FederalIncomeTax) -> Option<i32> {
        item.id
    }

    fn from_model(model: Model) -> ResultEngine<FederalIncomeTax> {
        Ok(FederalIncomeTax {
            id: Some(model.id),
            year: model.year,
            marital_status: parse_column(&model.marital_status)?,
            pay_period: parse_column(&model.pay_period)?,
            over: model.over,
            not_over: model.not_over,
            plus: model.plus,
            percent: model.percent,
            non_taxable: model.non_taxable,
            date_created: model.date_created,
            date_updated: model.date_updated,
        })
    }

    fn to_active_model(item: &FederalIncomeTax) -> ResultEngine<ActiveModel> {
        Ok(ActiveModel {
            year: ActiveValue::Set(item.year),
            marital_status: ActiveValue::Set(item.marital_status.as_str().to_string()),
            pay_period: ActiveValue::Set(item.pay_period.as_str().to_string()),
            over: ActiveValue::Set(item.over),
            not_over: ActiveValue::Set(item.not_over),
            plus: ActiveValue::Set(item.plus),
            percent: ActiveValue::Set(item.percent),
            non_taxable: ActiveValue::Set(item.non_taxable),
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

    fn validate(item: &FederalIncomeTax) -> ResultEngine<()> {
        validate_bracket(item)
    }

    fn conflict_scope(item: &FederalIncomeTax) -> Option<Condition> {
        Some(
            Condition::all()
                .add(Column::Year.eq(item.year))
                .add(Column::MaritalStatus.eq(item.marital_status.as_str()))
                .add(Column::PayPeriod.eq(item.pay_period.as_str())),
        )
    }

    fn conflicts(item: &FederalIncomeTax, existing: &FederalIncomeTax) -> bool {
        ranges_overlap(item, existing)
    }
}

/// Field-level checks for a bracket.
pub fn validate_bracket(item: &FederalIncomeTax) -> ResultEngine<()> {
    if item.year <= 0 {
        return Err(EngineError::InvalidField("year must be > 0".to_string()));
    }
    if !item.over.is_finite() || item.over < 0.0 {
        return Err(EngineError::InvalidField("over must be >= 0".to_string()));
    }
    if let Some(not_over) = item.not_over
        && (!not_over.is_finite() || not_over <= item.over)
    {
        return Err(EngineError::InvalidField(
            "notOver must be greater than over".to_string(),
        ));
    }
    if !(0.0..=100.0).contains(&item.percent) {
        return Err(EngineError::InvalidField(
            "percent must be between 0 and 100".to_string(),
        ));
    }
    if !item.plus.is_finite() || item.plus < 0.0 {
        return Err(EngineError::InvalidField("plus must be >= 0".to_string()));
    }
    if !item.non_taxable.is_finite() || item.non_taxable < 0.0 {
        return Err(EngineError::InvalidField(
            "nonTaxable must be >= 0".to_string(),
        ));
    }
    Ok(())
}

/// Whether the half-open ranges `[over, not_over)` of two brackets intersect.
///
/// Only meaningful for brackets of the same group; the grouping is applied
/// by the conflict scope query.
pub fn ranges_overlap(a: &FederalIncomeTax, b: &FederalIncomeTax) -> bool {
    let a_end = a.not_over.unwrap_or(f64::INFINITY);
    let b_end = b.not_over.unwrap_or(f64::INFINITY);
    a.over < b_end && b.over < a_end
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_types::tax::{MaritalStatus, PayPeriod};

    fn bracket(over: f64, not_over: Option<f64>) -> FederalIncomeTax {
        FederalIncomeTax {
            id: None,
            year: 2020,
            marital_status: MaritalStatus::Single,
            pay_period: PayPeriod::Weekly,
            over,
            not_over,
            plus: 0.0,
            percent: 10.0,
            non_taxable: 0.0,
            date_created: 0,
            date_updated: 0,
        }
    }

    #[test]
    fn lower_bound_inside_existing_overlaps() {
        let existing = bracket(1.0, Some(5.0));
        assert!(ranges_overlap(&bracket(2.0, Some(5.0)), &existing));
    }

    #[test]
    fn upper_bound_inside_existing_overlaps() {
        let existing = bracket(1.0, Some(5.0));
        assert!(ranges_overlap(&bracket(1.0, Some(2.0)), &existing));
    }

    #[test]
    fn range_extending_past_existing_overlaps() {
        let existing = bracket(1.0, Some(5.0));
        assert!(ranges_overlap(&bracket(2.0, Some(10.0)), &existing));
    }

    #[test]
    fn identical_and_enclosing_ranges_overlap() {
        let existing = bracket(1.0, Some(5.0));
        assert!(ranges_overlap(&bracket(1.0, Some(5.0)), &existing));
        assert!(ranges_overlap(&bracket(0.0, Some(10.0)), &existing));
    }

    #[test]
    fn adjacent_ranges_do_not_overlap() {
        let existing = bracket(1.0, Some(5.0));
        assert!(!ranges_overlap(&bracket(5.0, Some(10.0)), &existing));
        assert!(!ranges_overlap(&bracket(0.0, Some(1.0)), &existing));
    }

    #[test]
    fn unbounded_top_bracket_overlaps_everything_above() {
        let top = bracket(100.0, None);
        assert!(ranges_overlap(&bracket(500.0, Some(600.0)), &top));
        assert!(!ranges_overlap(&bracket(50.0, Some(100.0)), &top));
        assert!(ranges_overlap(&bracket(200.0, None), &top));
    }

    #[test]
    fn validation_rejects_inverted_range() {
        assert_eq!(
            validate_bracket(&bracket(5.0, Some(5.0))),
            Err(EngineError::InvalidField(
                "notOver must be greater than over".to_string()
            ))
        );
    }

    #[test]
    fn validation_rejects_bad_percent_and_year() {
        let mut item = bracket(0.0, None);
        item.percent = 120.0;
        assert!(validate_bracket(&item).is_err());

        let mut item = bracket(0.0, None);
        item.year = 0;
        assert!(validate_bracket(&item).is_err());
    }

    #[test]
    fn validation_accepts_open_top_bracket() {
        assert!(validate_bracket(&bracket(0.0, None)).is_ok());
    }
}
