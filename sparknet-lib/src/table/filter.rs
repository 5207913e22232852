//! Global text filter over table rows

use std::collections::HashMap;

use super::MatchScore;
use super::Ranker;
use super::rank_value;
use crate::model::Record;
use crate::model::Value;

static NULL: Value = Value::Null;

/// Per-column match scores recorded while a global filter is active.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterMeta {
    scores: HashMap<String, MatchScore>,
}

impl FilterMeta {
    /// Returns the score recorded for a column.
    pub fn get(&self, column_id: &str) -> Option<&MatchScore> {
        self.scores.get(column_id)
    }

    pub fn insert(&mut self, column_id: impl Into<String>, score: MatchScore) {
        self.scores.insert(column_id.into(), score);
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn clear(&mut self) {
        self.scores.clear();
    }
}

/// A record as seen by a table, with its transient filter metadata.
///
/// The record is only borrowed; filtering and sorting never touch it.
#[derive(Debug, Clone)]
pub struct TableRow<'a> {
    record: &'a Record,
    meta: FilterMeta,
}

impl<'a> TableRow<'a> {
    pub fn new(record: &'a Record) -> Self {
        Self {
            record,
            meta: FilterMeta::default(),
        }
    }

    pub fn record(&self) -> &'a Record {
        self.record
    }

    pub fn meta(&self) -> &FilterMeta {
        &self.meta
    }

    pub fn meta_mut(&mut self) -> &mut FilterMeta {
        &mut self.meta
    }

    /// Returns the raw cell value, null when the record lacks the field.
    pub fn value(&self, column_id: &str) -> &'a Value {
        self.record.get(column_id).unwrap_or(&NULL)
    }
}

/// Scores `column_id` of `row` against the query and records the score.
///
/// Returns `true` if the column matched. A non-string query is coerced to
/// text the same way cell values are.
pub fn fuzzy_filter(row: &mut TableRow<'_>, column_id: &str, query: &Value) -> bool {
    let score = rank_value(row.value(column_id), &query.to_text());
    row.meta.insert(column_id, score);
    score.passed()
}

/// Applies a global query across `columns`, keeping rows where any column matched.
///
/// Every column is scored so sorting can use the metadata afterwards.
pub fn filter_rows<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    columns: &[&str],
    query: &Value,
) -> Vec<TableRow<'a>> {
    let mut ranker = Ranker::new(&query.to_text());
    records
        .into_iter()
        .filter_map(|record| {
            let mut row = TableRow::new(record);
            let mut passed = false;
            for &column in columns {
                let score = ranker.rank(row.value(column));
                row.meta.insert(column, score);
                passed |= score.passed();
            }
            passed.then_some(row)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Rank;

    #[test]
    fn test_filter_records_score_on_row() {
        let record = Record::new().set("name", "Kevin Ivan");
        let mut row = TableRow::new(&record);

        assert!(fuzzy_filter(&mut row, "name", &Value::from("kev")));
        assert_eq!(row.meta().get("name").unwrap().rank, Rank::StartsWith);
        assert!(!fuzzy_filter(&mut row, "email", &Value::from("kev")));
        assert_eq!(row.meta().get("email").unwrap().rank, Rank::NoMatch);
    }

    #[test]
    fn test_numeric_query_is_coerced() {
        let record = Record::new().set("rate", 45);
        let mut row = TableRow::new(&record);

        assert!(fuzzy_filter(&mut row, "rate", &Value::from(45)));
    }

    #[test]
    fn test_filter_leaves_record_untouched() {
        let record = Record::with_id("m1").set("name", "Kevin Ivan");
        let before = record.clone();
        let rows = filter_rows([&record], &["name"], &Value::from("kevin"));

        assert_eq!(rows.len(), 1);
        assert_eq!(record, before);
    }
}
