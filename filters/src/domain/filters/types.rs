//! Filter type definitions
//!
//! Input side: the grid's column filter state and the two descriptor shapes
//! it may contain. Output side: the criteria handed to the query API.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// Input
// =============================================================================

/// Per-column filter state as produced by the grid.
///
/// Iteration follows insertion order (document order when parsed from JSON).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ColumnFilterState {
    columns: Map<String, Value>,
}

impl ColumnFilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the raw descriptor for a column. Re-inserting a column keeps its position.
    pub fn insert(&mut self, field: impl Into<String>, descriptor: Value) -> Option<Value> {
        self.columns.insert(field.into(), descriptor)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.columns.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl From<Map<String, Value>> for ColumnFilterState {
    fn from(columns: Map<String, Value>) -> Self {
        Self { columns }
    }
}

impl FromIterator<(String, Value)> for ColumnFilterState {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

/// UI-level comparison token sent by the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorToken {
    Contains,
    NotContains,
    Equals,
    NotEqual,
    StartsWith,
    EndsWith,
}

impl OperatorToken {
    pub const ALL: [OperatorToken; 6] = [
        Self::Contains,
        Self::NotContains,
        Self::Equals,
        Self::NotEqual,
        Self::StartsWith,
        Self::EndsWith,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::NotContains => "notContains",
            Self::Equals => "equals",
            Self::NotEqual => "notEqual",
            Self::StartsWith => "startsWith",
            Self::EndsWith => "endsWith",
        }
    }

    /// Exact, case-sensitive lookup
    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == token)
    }
}

impl fmt::Display for OperatorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One comparison on a column, after classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleCondition {
    pub filter_type: String,
    /// Raw operator token; mapped to an [`ApiOperator`] during translation
    pub token: String,
    pub value: String,
}

/// Two comparisons joined by a boolean relation, after classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiCondition {
    pub filter_type: String,
    /// Raw relation value; `None` when the grid sent `null`
    pub operator: Option<String>,
    pub condition1: SingleCondition,
    pub condition2: SingleCondition,
}

impl MultiCondition {
    /// `OR` only for the literal `"OR"`, `AND` otherwise.
    pub fn relation(&self) -> Relation {
        match self.operator.as_deref() {
            Some("OR") => Relation::Or,
            _ => Relation::And,
        }
    }
}

/// Column descriptor discriminated by shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Descriptor {
    Single(SingleCondition),
    Multi(MultiCondition),
}

impl Descriptor {
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Single(_) => "single",
            Self::Multi(_) => "multi",
        }
    }
}

// =============================================================================
// Output
// =============================================================================

/// Operator vocabulary understood by the query API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ApiOperator {
    Like,
    NotLike,
    Equals,
    NotEquals,
    StartsWith,
    EndsWith,
}

impl ApiOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "Like",
            Self::NotLike => "NotLike",
            Self::Equals => "Equals",
            Self::NotEquals => "NotEquals",
            Self::StartsWith => "StartsWith",
            Self::EndsWith => "EndsWith",
        }
    }
}

impl fmt::Display for ApiOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the conditions of a combined filter relate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Relation {
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Condition {
    pub operator: ApiOperator,
    pub value: String,
}

/// Normalized filter for one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FilterCriterion {
    pub field: String,
    /// Present only when the source combined two conditions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<Relation>,
    pub conditions: Vec<Condition>,
}

/// Ordered criteria for every filtered column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FilterRequest {
    pub criteria: Vec<FilterCriterion>,
}

impl FilterRequest {
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.criteria.iter().map(|c| c.field.as_str())
    }
}
