//! Row ordering for table columns

use std::cmp::Ordering;

use super::TableRow;

/// Orders two rows on a column.
///
/// When both rows carry filter metadata for the column the better match
/// comes first. Ties, and rows without metadata, fall back to
/// [`compare_alphanumeric`] on the raw values.
pub fn fuzzy_sort(a: &TableRow<'_>, b: &TableRow<'_>, column_id: &str) -> Ordering {
    let by_score = match (a.meta().get(column_id), b.meta().get(column_id)) {
        (Some(a), Some(b)) => b.cmp(a),
        _ => Ordering::Equal,
    };
    by_score.then_with(|| alphanumeric_sort(a, b, column_id))
}

/// Orders two rows on a column by [`compare_alphanumeric`] only.
pub fn alphanumeric_sort(a: &TableRow<'_>, b: &TableRow<'_>, column_id: &str) -> Ordering {
    compare_alphanumeric(&a.value(column_id).to_text(), &b.value(column_id).to_text())
}

/// Compares two strings case-insensitively with embedded numbers compared by value.
///
/// Both strings are split into runs of digits and non-digits. Text runs
/// compare lexically, digit runs numerically, and a text run sorts before a
/// digit run. If every shared run is equal the string with fewer runs comes
/// first.
///
/// ```
/// use std::cmp::Ordering;
/// use sparknet_lib::table::compare_alphanumeric;
///
/// assert_eq!(compare_alphanumeric("item2", "item10"), Ordering::Less);
/// ```
pub fn compare_alphanumeric(a: &str, b: &str) -> Ordering {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let a_chunks = chunks(&a);
    let b_chunks = chunks(&b);

    for (x, y) in a_chunks.iter().zip(&b_chunks) {
        let ordering = match (is_digits(x), is_digits(y)) {
            (false, false) => x.cmp(y),
            (false, true) => Ordering::Less,
            (true, false) => Ordering::Greater,
            (true, true) => compare_numeric(x, y),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    a_chunks.len().cmp(&b_chunks.len())
}

/// Compares digit runs by value without parsing, so any length works.
fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn is_digits(chunk: &str) -> bool {
    chunk.starts_with(|c: char| c.is_ascii_digit())
}

fn chunks(s: &str) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut digits = None;

    for (i, c) in s.char_indices() {
        let is_digit = c.is_ascii_digit();
        if digits.is_some_and(|d| d != is_digit) {
            chunks.push(&s[start..i]);
            start = i;
        }
        digits = Some(is_digit);
    }
    if start < s.len() {
        chunks.push(&s[start..]);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;
    use crate::table::fuzzy_filter;
    use crate::model::Value;

    #[test]
    fn test_numbers_compare_by_value() {
        assert_eq!(compare_alphanumeric("item2", "item10"), Ordering::Less);
        assert_eq!(compare_alphanumeric("item10", "item2"), Ordering::Greater);
        assert_eq!(compare_alphanumeric("v007", "v7"), Ordering::Equal);
        assert_eq!(
            compare_alphanumeric("id99999999999999999999999", "id100000000000000000000000"),
            Ordering::Less
        );
    }

    #[test]
    fn test_case_insensitive_and_text_before_digits() {
        assert_eq!(compare_alphanumeric("Alex", "alex"), Ordering::Equal);
        assert_eq!(compare_alphanumeric("alex", "Bob"), Ordering::Less);
        assert_eq!(compare_alphanumeric("a", "1"), Ordering::Less);
        assert_eq!(compare_alphanumeric("item", "item2"), Ordering::Less);
    }

    #[test]
    fn test_chunks() {
        assert_eq!(chunks("item10b2"), vec!["item", "10", "b", "2"]);
        assert!(chunks("").is_empty());
    }

    #[test]
    fn test_better_score_wins_over_alphabet() {
        let zed = Record::new().set("name", "kevin");
        let abe = Record::new().set("name", "a kevin");
        let mut a = TableRow::new(&zed);
        let mut b = TableRow::new(&abe);
        let query = Value::from("kevin");
        fuzzy_filter(&mut a, "name", &query);
        fuzzy_filter(&mut b, "name", &query);

        assert_eq!(fuzzy_sort(&a, &b, "name"), Ordering::Less);
        assert_eq!(alphanumeric_sort(&a, &b, "name"), Ordering::Greater);
    }

    #[test]
    fn test_without_metadata_falls_back_to_alphanumeric() {
        let first = Record::new().set("name", "item2");
        let second = Record::new().set("name", "item10");
        let a = TableRow::new(&first);
        let b = TableRow::new(&second);

        assert_eq!(fuzzy_sort(&a, &b, "name"), Ordering::Less);
    }
}
