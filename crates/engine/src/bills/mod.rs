//! Personal bill tracking. Every row belongs to the user who wrote it.

#[allow(clippy::module_inception)]
pub mod bills;
pub mod categories;
pub mod income;
pub mod income_occurrences;
pub mod occurrences;

pub use bills::Bills;
pub use categories::Categories;
pub use income::IncomeSources;
pub use income_occurrences::IncomeOccurrences;
pub use occurrences::Occurrences;

use std::collections::BTreeSet;

use sea_orm::{DatabaseTransaction, QueryFilter, QuerySelect, prelude::*};

use crate::{EngineError, ResultEngine};

/// Amounts are kept as the decimal strings clients send; they only have to
/// parse as a non-negative number.
pub(crate) fn validate_amount(value: &str, label: &str) -> ResultEngine<()> {
    match value.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => Ok(()),
        _ => Err(EngineError::InvalidField(format!(
            "{label} must be a non-negative decimal, got '{value}'"
        ))),
    }
}

/// Every id in `ids` must be a row of `E` owned by `owner`; the first one
/// that is not comes back as `KeyNotFound`.
pub(crate) async fn ensure_owned<E>(
    tx: &DatabaseTransaction,
    id_column: E::Column,
    owner_column: E::Column,
    ids: impl IntoIterator<Item = i32>,
    owner: &str,
    label: &str,
) -> ResultEngine<()>
where
    E: EntityTrait,
{
    let wanted: BTreeSet<i32> = ids.into_iter().collect();
    if wanted.is_empty() {
        return Ok(());
    }

    let found: BTreeSet<i32> = E::find()
        .select_only()
        .column(id_column)
        .filter(id_column.is_in(wanted.iter().copied()))
        .filter(owner_column.eq(owner))
        .into_tuple::<i32>()
        .all(tx)
        .await?
        .into_iter()
        .collect();

    match wanted.difference(&found).next() {
        Some(missing) => Err(EngineError::KeyNotFound(format!("{label} {missing}"))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_must_be_non_negative_decimals() {
        assert!(validate_amount("12.50", "amount").is_ok());
        assert!(validate_amount(" 0 ", "amount").is_ok());
        assert!(validate_amount("-1", "amount").is_err());
        assert!(validate_amount("ten", "amount").is_err());
        assert!(validate_amount("NaN", "amount").is_err());
    }
}
