// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Forgiving deserializers for hand-edited or legacy stored records.
//!
//! Numeric fields written by older clients may hold strings, `null`, or
//! nothing at all. None of these should make a whole profile collection
//! unreadable, so each field falls back to its documented default instead.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeSet;

/// Interpret a JSON value as a finite number, accepting numeric strings.
fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// A distance or other quantity; anything non-numeric becomes `0.0`.
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_number(&value).unwrap_or(0.0))
}

/// An optional quantity; anything non-numeric is treated as unset.
pub fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_number(&value))
}

/// A non-negative counter; negatives and garbage become `0`.
pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_number(&value)
        .filter(|n| *n > 0.0)
        .map(|n| n.floor().min(u32::MAX as f64) as u32)
        .unwrap_or(0))
}

/// Household size; garbage becomes a single-person household.
pub fn household_size<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_number(&value)
        .filter(|n| *n >= 1.0)
        .map(|n| n.floor().min(u32::MAX as f64) as u32)
        .unwrap_or(1))
}

/// Any field whose type has a sensible default (enums, flags).
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// A list whose unreadable items are dropped with a warning, keeping the
/// rest (e.g. one entry with an impossible date).
pub fn valid_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => Vec::new(),
    };
    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match T::deserialize(item) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(index, error = %e, "Dropping unreadable stored item");
                None
            }
        })
        .collect())
}

/// A set whose unrecognized items are dropped rather than failing the
/// whole list (e.g. badge ids from a newer client).
pub fn known_set<'de, D, T>(deserializer: D) -> Result<BTreeSet<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned + Ord,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => Vec::new(),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| T::deserialize(item).ok())
        .collect())
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use std::collections::BTreeSet;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "super::number")]
        km: f64,
        #[serde(default, deserialize_with = "super::optional_number")]
        occ: Option<f64>,
        #[serde(default, deserialize_with = "super::count")]
        refills: u32,
        #[serde(default = "one", deserialize_with = "super::household_size")]
        household: u32,
        #[serde(default, deserialize_with = "super::or_default")]
        flag: bool,
        #[serde(default, deserialize_with = "super::known_set")]
        sizes: BTreeSet<u8>,
        #[serde(default, deserialize_with = "super::valid_items")]
        days: Vec<chrono::NaiveDate>,
    }

    fn one() -> u32 {
        1
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let p: Probe =
            serde_json::from_str(r#"{"km":"12.5","occ":"3","refills":"4","household":"2"}"#)
                .unwrap();
        assert_eq!(p.km, 12.5);
        assert_eq!(p.occ, Some(3.0));
        assert_eq!(p.refills, 4);
        assert_eq!(p.household, 2);
    }

    #[test]
    fn test_garbage_falls_back() {
        let p: Probe = serde_json::from_str(
            r#"{"km":"abc","occ":null,"refills":-3,"household":"lots","flag":"yes"}"#,
        )
        .unwrap();
        assert_eq!(p.km, 0.0);
        assert_eq!(p.occ, None);
        assert_eq!(p.refills, 0);
        assert_eq!(p.household, 1);
        assert!(!p.flag);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let p: Probe = serde_json::from_str("{}").unwrap();
        assert_eq!(p.km, 0.0);
        assert_eq!(p.occ, None);
        assert_eq!(p.refills, 0);
        assert_eq!(p.household, 1);
    }

    #[test]
    fn test_fractional_counts_round_down() {
        let p: Probe = serde_json::from_str(r#"{"refills":2.9,"household":3.7}"#).unwrap();
        assert_eq!(p.refills, 2);
        assert_eq!(p.household, 3);
    }

    #[test]
    fn test_known_set_drops_unrecognized_items() {
        let p: Probe = serde_json::from_str(r#"{"sizes":[3,"x",1,300,3]}"#).unwrap();
        assert_eq!(p.sizes.into_iter().collect::<Vec<_>>(), vec![1, 3]);

        let p: Probe = serde_json::from_str(r#"{"sizes":"oops"}"#).unwrap();
        assert!(p.sizes.is_empty());
    }

    #[test]
    fn test_valid_items_keeps_readable_entries() {
        let p: Probe =
            serde_json::from_str(r#"{"days":["2024-03-01","2024-02-30",7,"2024-03-02"]}"#).unwrap();
        assert_eq!(p.days.len(), 2);
        assert_eq!(p.days[1].to_string(), "2024-03-02");
    }
}
