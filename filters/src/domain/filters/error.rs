//! Filter translation error types

use serde_json::Value;
use thiserror::Error;

/// Error code for descriptors matching neither condition shape
pub const CODE_INVALID_SHAPE: &str = "INVALID_FILTER_SHAPE";

/// Error code for operator tokens outside the supported vocabulary
pub const CODE_UNSUPPORTED_OPERATOR: &str = "UNSUPPORTED_FILTER_OPERATOR";

/// Error code for filter state text that is not valid JSON
pub const CODE_INVALID_JSON: &str = "INVALID_FILTER_JSON";

/// Error code for filter state JSON whose top level is not an object
pub const CODE_INVALID_STATE: &str = "INVALID_FILTER_STATE";

#[derive(Error, Debug)]
pub enum FilterError {
    /// The descriptor's key set matches neither the single nor the multi
    /// condition shape. Usually means the grid library changed its model.
    #[error(
        "Cannot convert filter for column '{field}': descriptor matches neither the single nor the combined condition shape"
    )]
    Conversion { field: String, descriptor: Value },

    /// The descriptor is well-formed but its operator token has no API mapping.
    #[error("Unsupported filter operator '{token}' for column '{field}'")]
    UnsupportedOperator { field: String, token: String },

    #[error("Invalid filter JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Filter state must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}

impl FilterError {
    pub fn conversion(field: &str, descriptor: &Value) -> Self {
        Self::Conversion {
            field: field.to_string(),
            descriptor: descriptor.clone(),
        }
    }

    pub fn unsupported_operator(field: &str, token: &str) -> Self {
        Self::UnsupportedOperator {
            field: field.to_string(),
            token: token.to_string(),
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Conversion { .. } => CODE_INVALID_SHAPE,
            Self::UnsupportedOperator { .. } => CODE_UNSUPPORTED_OPERATOR,
            Self::InvalidJson(_) => CODE_INVALID_JSON,
            Self::NotAnObject { .. } => CODE_INVALID_STATE,
        }
    }

    pub fn is_conversion(&self) -> bool {
        matches!(self, Self::Conversion { .. })
    }

    pub fn is_unsupported_operator(&self) -> bool {
        matches!(self, Self::UnsupportedOperator { .. })
    }

    /// Column the error refers to, if it came from a single column
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Conversion { field, .. } | Self::UnsupportedOperator { field, .. } => Some(field),
            Self::InvalidJson(_) | Self::NotAnObject { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_conversion_error_display() {
        let err = FilterError::conversion("email", &json!({"bad": "bad"}));
        assert_eq!(
            err.to_string(),
            "Cannot convert filter for column 'email': descriptor matches neither the single nor the combined condition shape"
        );
        assert_eq!(err.code(), CODE_INVALID_SHAPE);
        assert_eq!(err.field(), Some("email"));
        assert!(err.is_conversion());
        assert!(!err.is_unsupported_operator());
    }

    #[test]
    fn test_conversion_error_keeps_raw_descriptor() {
        let raw = json!({"filterType": "text", "type": "equals"});
        let err = FilterError::conversion("name", &raw);
        match err {
            FilterError::Conversion { descriptor, .. } => assert_eq!(descriptor, raw),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_operator_display() {
        let err = FilterError::unsupported_operator("age", "greaterThan");
        assert_eq!(
            err.to_string(),
            "Unsupported filter operator 'greaterThan' for column 'age'"
        );
        assert_eq!(err.code(), CODE_UNSUPPORTED_OPERATOR);
        assert!(err.is_unsupported_operator());
        assert!(!err.is_conversion());
    }

    #[test]
    fn test_boundary_errors_have_no_field() {
        let json_err = serde_json::from_str::<Value>("{").unwrap_err();
        let err = FilterError::from(json_err);
        assert_eq!(err.code(), CODE_INVALID_JSON);
        assert_eq!(err.field(), None);

        let err = FilterError::NotAnObject { found: "array" };
        assert_eq!(err.to_string(), "Filter state must be a JSON object, found array");
        assert_eq!(err.code(), CODE_INVALID_STATE);
    }
}
