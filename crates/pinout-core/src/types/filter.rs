//! Filter types for vector store queries.

use serde::{Deserialize, Serialize};

/// Filter operator for payload queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    /// Equal to.
    Eq(serde_json::Value),
    /// Field exists with a non-null value.
    Exists,
}

/// A single filter condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterCondition {
    /// Field name to filter on.
    pub field: String,
    /// Operator to apply.
    pub operator: FilterOperator,
}

/// Composite filter over payload fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Filter {
    /// Single condition.
    Condition(FilterCondition),
    /// AND of multiple filters.
    And(Vec<Filter>),
}

impl Filter {
    /// Create an equality filter.
    pub fn eq(field: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Filter::Condition(FilterCondition {
            field: field.into(),
            operator: FilterOperator::Eq(value.into()),
        })
    }

    /// Create an exists filter.
    pub fn exists(field: impl Into<String>) -> Self {
        Filter::Condition(FilterCondition {
            field: field.into(),
            operator: FilterOperator::Exists,
        })
    }

    /// Create an AND filter.
    pub fn and(filters: Vec<Filter>) -> Self {
        Filter::And(filters)
    }

    /// Evaluate this filter against a payload.
    pub fn matches(&self, payload: &std::collections::HashMap<String, serde_json::Value>) -> bool {
        match self {
            Filter::Condition(cond) => match &cond.operator {
                FilterOperator::Eq(value) => payload.get(&cond.field) == Some(value),
                FilterOperator::Exists => payload
                    .get(&cond.field)
                    .map(|v| !v.is_null())
                    .unwrap_or(false),
            },
            Filter::And(filters) => filters.iter().all(|f| f.matches(payload)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_eq_filter_matches() {
        let mut payload = HashMap::new();
        payload.insert("source".to_string(), serde_json::json!("a.pdf"));

        assert!(Filter::eq("source", "a.pdf").matches(&payload));
        assert!(!Filter::eq("source", "b.pdf").matches(&payload));
    }

    #[test]
    fn test_and_filter_requires_all() {
        let mut payload = HashMap::new();
        payload.insert("source".to_string(), serde_json::json!("a.pdf"));
        payload.insert("page".to_string(), serde_json::json!(2));

        let filter = Filter::and(vec![Filter::eq("source", "a.pdf"), Filter::eq("page", 2)]);
        assert!(filter.matches(&payload));

        let filter = Filter::and(vec![Filter::eq("source", "a.pdf"), Filter::exists("Gender")]);
        assert!(!filter.matches(&payload));
    }
}
