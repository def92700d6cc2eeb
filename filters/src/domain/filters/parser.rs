//! Filter state parsing and descriptor classification
//!
//! Raw grid JSON is turned into a [`ColumnFilterState`] here, and each raw
//! descriptor is classified into a typed [`Descriptor`] by its exact key set.

use serde_json::{Map, Value};

use super::error::FilterError;
use super::types::{ColumnFilterState, Descriptor, MultiCondition, SingleCondition};

const KEY_FILTER_TYPE: &str = "filterType";
const KEY_TYPE: &str = "type";
const KEY_FILTER: &str = "filter";
const KEY_OPERATOR: &str = "operator";
const KEY_CONDITION1: &str = "condition1";
const KEY_CONDITION2: &str = "condition2";

const SINGLE_KEYS: [&str; 3] = [KEY_FILTER_TYPE, KEY_TYPE, KEY_FILTER];
const MULTI_KEYS: [&str; 4] = [KEY_FILTER_TYPE, KEY_OPERATOR, KEY_CONDITION1, KEY_CONDITION2];

/// Parse grid filter state from JSON text
pub fn parse_filter_state(json_str: &str) -> Result<ColumnFilterState, FilterError> {
    let value: Value = serde_json::from_str(json_str)?;
    ColumnFilterState::from_value(value)
}

impl ColumnFilterState {
    /// Build from an already-parsed JSON value; the top level must be an object.
    pub fn from_value(value: Value) -> Result<Self, FilterError> {
        match value {
            Value::Object(map) => Ok(Self::from(map)),
            other => Err(FilterError::NotAnObject {
                found: json_kind(&other),
            }),
        }
    }
}

/// Classify one column's raw descriptor
///
/// Exact key-set matching: `{filterType, type, filter}` is single,
/// `{filterType, operator, condition1, condition2}` is multi, anything else
/// (including a superset of either) is a [`FilterError::Conversion`].
pub fn classify(field: &str, raw: &Value) -> Result<Descriptor, FilterError> {
    let Value::Object(map) = raw else {
        return Err(FilterError::conversion(field, raw));
    };

    if has_exact_keys(map, &MULTI_KEYS) {
        let condition1 = map.get(KEY_CONDITION1).and_then(single_condition);
        let condition2 = map.get(KEY_CONDITION2).and_then(single_condition);
        let (Some(condition1), Some(condition2)) = (condition1, condition2) else {
            return Err(FilterError::conversion(field, raw));
        };
        return Ok(Descriptor::Multi(MultiCondition {
            filter_type: map.get(KEY_FILTER_TYPE).map(text_of).unwrap_or_default(),
            operator: map.get(KEY_OPERATOR).and_then(relation_of),
            condition1,
            condition2,
        }));
    }

    single_from_map(map)
        .map(Descriptor::Single)
        .ok_or_else(|| FilterError::conversion(field, raw))
}

fn single_condition(value: &Value) -> Option<SingleCondition> {
    value.as_object().and_then(single_from_map)
}

fn single_from_map(map: &Map<String, Value>) -> Option<SingleCondition> {
    if !has_exact_keys(map, &SINGLE_KEYS) {
        return None;
    }
    Some(SingleCondition {
        filter_type: map.get(KEY_FILTER_TYPE).map(text_of)?,
        token: map.get(KEY_TYPE).map(text_of)?,
        value: map.get(KEY_FILTER).and_then(scalar_text)?,
    })
}

fn has_exact_keys(map: &Map<String, Value>, keys: &[&str]) -> bool {
    map.len() == keys.len() && keys.iter().all(|k| map.contains_key(*k))
}

/// Strings as-is, anything else as its JSON text
fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Comparison value: strings, numbers and booleans only
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn relation_of(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        other => Some(text_of(other)),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
