//! Column filter state to query API criteria

use super::error::FilterError;
use super::operators::map_operator;
use super::parser::classify;
use super::types::{
    ColumnFilterState, Condition, Descriptor, FilterCriterion, FilterRequest, Relation,
    SingleCondition,
};

/// Translate the grid's column filter state into a [`FilterRequest`].
///
/// Returns `Ok(None)` when no column is filtered, so callers can leave the
/// filter clause out of the query entirely. Any malformed descriptor or
/// unmapped operator fails the whole translation.
pub fn translate(state: &ColumnFilterState) -> Result<Option<FilterRequest>, FilterError> {
    if state.is_empty() {
        tracing::trace!("No column filters set");
        return Ok(None);
    }

    let criteria = state
        .iter()
        .map(|(field, raw)| {
            let descriptor = classify(field, raw)?;
            tracing::trace!(field, shape = descriptor.shape(), "Classified column filter");
            criterion(field, descriptor)
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(columns = criteria.len(), "Translated grid filter state");
    Ok(Some(FilterRequest { criteria }))
}

fn criterion(field: &str, descriptor: Descriptor) -> Result<FilterCriterion, FilterError> {
    match descriptor {
        Descriptor::Single(single) => Ok(FilterCriterion {
            field: field.to_string(),
            relation: None,
            conditions: vec![condition(field, single)?],
        }),
        Descriptor::Multi(multi) => {
            let relation = multi.relation();
            if relation == Relation::And && multi.operator.as_deref() != Some("AND") {
                tracing::debug!(
                    field,
                    operator = ?multi.operator,
                    "Unrecognized relation, defaulting to AND"
                );
            }
            Ok(FilterCriterion {
                field: field.to_string(),
                relation: Some(relation),
                conditions: vec![
                    condition(field, multi.condition1)?,
                    condition(field, multi.condition2)?,
                ],
            })
        }
    }
}

fn condition(field: &str, single: SingleCondition) -> Result<Condition, FilterError> {
    let operator = map_operator(&single.token)
        .ok_or_else(|| FilterError::unsupported_operator(field, &single.token))?;
    Ok(Condition {
        operator,
        value: single.value,
    })
}
