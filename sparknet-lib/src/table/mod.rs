//! Search, filter and sort for tabular list views
//!
//! The pieces are pure functions over fetched records:
//!
//! - [`rank_value`] scores a cell against a query
//! - [`fuzzy_filter`] records that score on a [`TableRow`] and decides if it passes
//! - [`fuzzy_sort`] orders rows by score, falling back to [`compare_alphanumeric`]
//!
//! [`TableView`] registers them as named strategies and [`DebouncedInput`]
//! sits between keystrokes and the global filter.

mod debounce;
mod filter;
mod rank;
mod sort;
mod view;

pub use debounce::*;
pub use filter::*;
pub use rank::*;
pub use sort::*;
pub use view::*;
