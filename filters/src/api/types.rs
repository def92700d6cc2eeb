//! Shared wire types
//!
//! What the query-execution side receives: the search envelope carrying the
//! translated filter clause, and the error body reported when translation fails.

use schemars::JsonSchema;
use serde::Serialize;

use crate::domain::filters::{FilterError, FilterRequest};

/// Error type for every filter failure (all caused by the request payload)
pub const ERROR_TYPE_BAD_REQUEST: &str = "bad_request";

/// Search request body fragment; `filter` is omitted when no column is filtered
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, JsonSchema)]
pub struct FilterEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterRequest>,
}

impl From<Option<FilterRequest>> for FilterEnvelope {
    fn from(filter: Option<FilterRequest>) -> Self {
        Self { filter }
    }
}

/// Standard error body: `{"error": ..., "code": ..., "message": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorBody {
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ERROR_TYPE_BAD_REQUEST.to_string(),
            code: code.into(),
            message: message.into(),
            field: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn from_filter(e: &FilterError) -> Self {
        match e {
            FilterError::Conversion { field, descriptor } => {
                tracing::warn!(
                    field = %field,
                    descriptor = %descriptor,
                    "Unrecognized filter descriptor"
                );
            }
            other => tracing::warn!(error = %other, "Filter rejected"),
        }
        let body = Self::bad_request(e.code(), e.to_string());
        match e.field() {
            Some(field) => body.with_field(field),
            None => body,
        }
    }
}

impl From<&FilterError> for ErrorBody {
    fn from(e: &FilterError) -> Self {
        Self::from_filter(e)
    }
}
