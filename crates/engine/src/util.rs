//! Internal helpers for model validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize
//! conversions between wire values and stored columns.

use serde::{Serialize, de::DeserializeOwned};
use unicode_normalization::UnicodeNormalization;

use crate::{EngineError, ResultEngine};

pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Comparison key for user-facing names: NFKC, trimmed, inner whitespace
/// collapsed, lowercased.
pub(crate) fn name_key(value: &str) -> String {
    let normalized: String = value.nfkc().collect();
    normalized
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

pub(crate) fn require_name(value: &str, label: &str) -> ResultEngine<()> {
    if value.trim().is_empty() {
        return Err(EngineError::InvalidField(format!(
            "{label} name must not be empty"
        )));
    }
    Ok(())
}

pub(crate) fn to_json<T: Serialize>(value: &T) -> ResultEngine<serde_json::Value> {
    Ok(serde_json::to_value(value)?)
}

pub(crate) fn from_json<T: DeserializeOwned>(value: serde_json::Value) -> ResultEngine<T> {
    Ok(serde_json::from_value(value)?)
}

/// Parse an enum stored as text.
pub(crate) fn parse_column<T>(value: &str) -> ResultEngine<T>
where
    T: for<'a> TryFrom<&'a str, Error = String>,
{
    T::try_from(value).map_err(EngineError::InvalidField)
}
