//! Grid filter translation
//!
//! Converts the data grid's per-column filter state into the criteria
//! structure consumed by the query API.
//!
//! ## Usage
//!
//! ```
//! use grid_filters::domain::filters::{parse_filter_state, translate, ApiOperator};
//!
//! let json_str = r#"{"email": {"filterType": "text", "type": "endsWith", "filter": ".com"}}"#;
//! let state = parse_filter_state(json_str).unwrap();
//! let request = translate(&state).unwrap().expect("one column is filtered");
//! assert_eq!(request.criteria[0].conditions[0].operator, ApiOperator::EndsWith);
//! ```
//!
//! ## Failure kinds
//!
//! - [`FilterError::Conversion`]: a descriptor has neither the single nor the
//!   combined condition shape (grid/library version mismatch).
//! - [`FilterError::UnsupportedOperator`]: the shape is fine but the operator
//!   token has no API counterpart yet.
//!
//! Both abort the whole translation; no partial request is ever returned.

mod error;
mod operators;
mod parser;
mod translate;
mod types;

pub use error::{
    CODE_INVALID_JSON, CODE_INVALID_SHAPE, CODE_INVALID_STATE, CODE_UNSUPPORTED_OPERATOR,
    FilterError,
};
pub use operators::{api_operator, map_operator, operator_table};
pub use parser::{classify, parse_filter_state};
pub use translate::translate;
pub use types::{
    ApiOperator, ColumnFilterState, Condition, Descriptor, FilterCriterion, FilterRequest,
    MultiCondition, OperatorToken, Relation, SingleCondition,
};
