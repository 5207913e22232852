//! Table model with named filter and sort strategies

use std::cmp::Ordering;
use std::collections::HashMap;

use super::TableRow;
use super::alphanumeric_sort;
use super::fuzzy_filter;
use super::fuzzy_sort;
use crate::error::Error;
use crate::model::Record;
use crate::model::Value;

/// A filter strategy: scores one column of a row against the global query.
pub type FilterFn = fn(&mut TableRow<'_>, &str, &Value) -> bool;

/// A sort strategy: compares two rows on a column.
pub type SortFn = fn(&TableRow<'_>, &TableRow<'_>, &str) -> Ordering;

/// A table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub id: String,
    pub header: String,
    /// Whether the global filter looks at this column.
    pub filterable: bool,
    pub sortable: bool,
    /// Name of the registered sort strategy.
    pub sort_fn: String,
}

impl Column {
    /// A filterable, sortable column using the `"fuzzy"` sort.
    pub fn new(id: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            filterable: true,
            sortable: true,
            sort_fn: "fuzzy".to_string(),
        }
    }

    pub fn not_filterable(mut self) -> Self {
        self.filterable = false;
        self
    }

    pub fn not_sortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn sort_fn(mut self, name: impl Into<String>) -> Self {
        self.sort_fn = name.into();
        self
    }
}

/// The active sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sorting {
    pub column: String,
    pub descending: bool,
}

/// Columns, a global filter and a sort, applied to records on demand.
///
/// Nothing is cached: [`TableView::rows`] recomputes scores and order from
/// the current query every time it is called.
pub struct TableView {
    columns: Vec<Column>,
    global_filter: Option<Value>,
    filter_fn: String,
    sorting: Option<Sorting>,
    filter_fns: HashMap<String, FilterFn>,
    sort_fns: HashMap<String, SortFn>,
}

impl TableView {
    /// Creates a view with the built-in strategies registered.
    ///
    /// Registered filters: `"fuzzy"`. Registered sorts: `"fuzzy"`,
    /// `"alphanumeric"`.
    pub fn new(columns: Vec<Column>) -> Result<Self, Error> {
        let mut view = Self {
            columns: Vec::new(),
            global_filter: None,
            filter_fn: "fuzzy".to_string(),
            sorting: None,
            filter_fns: HashMap::new(),
            sort_fns: HashMap::new(),
        };
        view.register_filter("fuzzy", fuzzy_filter);
        view.register_sort("fuzzy", fuzzy_sort);
        view.register_sort("alphanumeric", alphanumeric_sort);

        for column in columns {
            view.add_column(column)?;
        }
        Ok(view)
    }

    pub fn register_filter(&mut self, name: impl Into<String>, filter: FilterFn) {
        self.filter_fns.insert(name.into(), filter);
    }

    pub fn register_sort(&mut self, name: impl Into<String>, sort: SortFn) {
        self.sort_fns.insert(name.into(), sort);
    }

    /// Adds a column, checking its sort strategy is registered.
    pub fn add_column(&mut self, column: Column) -> Result<(), Error> {
        if !self.sort_fns.contains_key(&column.sort_fn) {
            return Err(Error::InvalidOperation(format!(
                "unknown sort strategy '{}' on column '{}'",
                column.sort_fn, column.id
            )));
        }
        self.columns.push(column);
        Ok(())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Selects the global filter strategy.
    pub fn set_filter_fn(&mut self, name: &str) -> Result<(), Error> {
        if !self.filter_fns.contains_key(name) {
            return Err(Error::InvalidOperation(format!(
                "unknown filter strategy '{name}'"
            )));
        }
        self.filter_fn = name.to_string();
        Ok(())
    }

    pub fn global_filter(&self) -> Option<&Value> {
        self.global_filter.as_ref()
    }

    /// Sets the global query. An empty query clears the filter.
    pub fn set_global_filter(&mut self, query: impl Into<Value>) {
        let query = query.into();
        self.global_filter = if query.to_text().is_empty() {
            None
        } else {
            Some(query)
        };
    }

    pub fn clear_global_filter(&mut self) {
        self.global_filter = None;
    }

    pub fn sorting(&self) -> Option<&Sorting> {
        self.sorting.as_ref()
    }

    /// Sorts by a column.
    pub fn sort_by(&mut self, column_id: &str, descending: bool) -> Result<(), Error> {
        let column = self.column(column_id).ok_or_else(|| {
            Error::InvalidOperation(format!("unknown column '{column_id}'"))
        })?;
        if !column.sortable {
            return Err(Error::InvalidOperation(format!(
                "column '{column_id}' is not sortable"
            )));
        }
        self.sorting = Some(Sorting {
            column: column_id.to_string(),
            descending,
        });
        Ok(())
    }

    pub fn clear_sorting(&mut self) {
        self.sorting = None;
    }

    /// Filters and sorts `records` with the current state.
    pub fn rows<'a>(&self, records: &'a [Record]) -> Vec<TableRow<'a>> {
        let mut rows: Vec<TableRow<'a>> = records.iter().map(TableRow::new).collect();

        if let (Some(query), Some(filter)) =
            (&self.global_filter, self.filter_fns.get(&self.filter_fn))
        {
            rows.retain_mut(|row| {
                let mut passed = false;
                for column in self.columns.iter().filter(|c| c.filterable) {
                    passed |= filter(&mut *row, &column.id, query);
                }
                passed
            });
        }

        if let Some(sorting) = &self.sorting
            && let Some(sort) = self
                .column(&sorting.column)
                .and_then(|c| self.sort_fns.get(&c.sort_fn))
        {
            rows.sort_by(|a, b| {
                let ordering = sort(a, b, &sorting.column);
                if sorting.descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }

        rows
    }
}
