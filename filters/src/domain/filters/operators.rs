//! Operator mapping from grid tokens to query API operators

use super::types::{ApiOperator, OperatorToken};

/// Total mapping from every supported grid token to its API operator
pub fn api_operator(token: OperatorToken) -> ApiOperator {
    match token {
        OperatorToken::Contains => ApiOperator::Like,
        OperatorToken::NotContains => ApiOperator::NotLike,
        OperatorToken::Equals => ApiOperator::Equals,
        OperatorToken::NotEqual => ApiOperator::NotEquals,
        OperatorToken::StartsWith => ApiOperator::StartsWith,
        OperatorToken::EndsWith => ApiOperator::EndsWith,
    }
}

/// Look up a raw token. `None` means the token is not wired to the API.
pub fn map_operator(token: &str) -> Option<ApiOperator> {
    OperatorToken::parse(token).map(api_operator)
}

/// The full mapping table, in vocabulary order
pub fn operator_table() -> impl Iterator<Item = (OperatorToken, ApiOperator)> {
    OperatorToken::ALL.into_iter().map(|t| (t, api_operator(t)))
}
