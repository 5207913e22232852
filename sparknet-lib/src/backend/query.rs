//! Document list queries

use serde_json::json;

use crate::model::Value;

/// A list query: equality filters and optional newest-first ordering.
///
/// These are the only query capabilities the console relies on.
///
/// # Example
///
/// ```
/// use sparknet_lib::backend::Query;
///
/// let query = Query::new().equal("status", "applicant").newest_first();
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    filters: Vec<(String, Value)>,
    newest_first: bool,
    limit: Option<u32>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps documents whose `field` equals `value`.
    ///
    /// For array attributes the array must contain `value`.
    pub fn equal(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    /// Orders by creation time, newest first.
    pub fn newest_first(mut self) -> Self {
        self.newest_first = true;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn filters(&self) -> &[(String, Value)] {
        &self.filters
    }

    pub fn is_newest_first(&self) -> bool {
        self.newest_first
    }

    pub fn max_results(&self) -> Option<u32> {
        self.limit
    }

    /// Encodes the query as the backend's `queries[]` parameters.
    pub fn to_params(&self) -> Vec<String> {
        let mut params: Vec<String> = self
            .filters
            .iter()
            .map(|(field, value)| {
                let values = match value {
                    Value::Array(items) => items.clone(),
                    other => vec![other.clone()],
                };
                json!({ "method": "equal", "attribute": field, "values": values }).to_string()
            })
            .collect();

        if self.newest_first {
            params.push(json!({ "method": "orderDesc", "attribute": "$createdAt" }).to_string());
        }
        if let Some(limit) = self.limit {
            params.push(json!({ "method": "limit", "values": [limit] }).to_string());
        }

        params
    }
}
