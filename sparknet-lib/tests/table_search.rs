use std::cmp::Ordering;

use sparknet_lib::model::Record;
use sparknet_lib::model::Value;
use sparknet_lib::table::Column;
use sparknet_lib::table::MatchScore;
use sparknet_lib::table::Rank;
use sparknet_lib::table::TableRow;
use sparknet_lib::table::TableView;
use sparknet_lib::table::compare_alphanumeric;
use sparknet_lib::table::filter_rows;
use sparknet_lib::table::fuzzy_filter;
use sparknet_lib::table::fuzzy_sort;
use sparknet_lib::table::rank_value;

fn names(rows: &[TableRow<'_>]) -> Vec<String> {
    rows.iter()
        .map(|r| r.value("name").to_text().into_owned())
        .collect()
}

#[test]
fn test_query_matches_only_kevin() {
    let records = vec![
        Record::new().set("name", "Alex Kowalczyk"),
        Record::new().set("name", "Kevin Ivan"),
    ];

    let rows = filter_rows(&records, &["name"], &Value::from("kevin"));
    assert_eq!(names(&rows), vec!["Kevin Ivan"]);
}

#[test]
fn test_roles_array_matches_front() {
    let records = vec![Record::new().set("roles", vec!["Frontend Developer"])];

    let rows = filter_rows(&records, &["roles"], &Value::from("front"));
    assert_eq!(rows.len(), 1);
    assert!(rows[0].meta().get("roles").unwrap().passed());
}

#[test]
fn test_empty_query_keeps_every_row_neutral() {
    let records = vec![
        Record::new().set("name", "Alex Kowalczyk"),
        Record::new().set("name", Value::Null),
    ];

    let rows = filter_rows(&records, &["name"], &Value::from(""));
    assert_eq!(rows.len(), 2);
    for row in &rows {
        assert_eq!(row.meta().get("name"), Some(&MatchScore::neutral()));
    }
}

#[test]
fn test_non_subsequence_is_excluded() {
    let records = vec![Record::new().set("name", "Alex Kowalczyk")];

    assert_eq!(rank_value(records[0].get("name").unwrap(), "zx").rank, Rank::NoMatch);
    assert!(filter_rows(&records, &["name"], &Value::from("zx")).is_empty());
}

#[test]
fn test_missing_value_matches_only_empty_query() {
    assert!(!rank_value(&Value::Null, "a").passed());
    assert!(rank_value(&Value::Null, "").passed());
}

#[test]
fn test_scoring_is_deterministic() {
    let value = Value::from(vec!["Backend Developer", "DevOps"]);
    for query in ["dev", "bd", "ops", "bkd", "nothing"] {
        assert_eq!(rank_value(&value, query), rank_value(&value, query));
    }
}

#[test]
fn test_any_column_is_enough() {
    let records = vec![
        Record::new().set("name", "Alex Kowalczyk").set("email", "kevin@example.com"),
        Record::new().set("name", "Maria Lopez").set("email", "maria@example.com"),
    ];

    let rows = filter_rows(&records, &["name", "email"], &Value::from("kevin"));
    assert_eq!(names(&rows), vec!["Alex Kowalczyk"]);
    assert!(!rows[0].meta().get("name").unwrap().passed());
}

#[test]
fn test_item2_before_item10() {
    assert_eq!(compare_alphanumeric("item2", "item10"), Ordering::Less);
}

#[test]
fn test_higher_score_sorts_first_regardless_of_text() {
    let a = Record::new().set("name", "zed");
    let b = Record::new().set("name", "a zed");
    let query = Value::from("zed");
    let mut row_a = TableRow::new(&a);
    let mut row_b = TableRow::new(&b);
    fuzzy_filter(&mut row_a, "name", &query);
    fuzzy_filter(&mut row_b, "name", &query);

    assert!(row_a.meta().get("name") > row_b.meta().get("name"));
    assert_eq!(fuzzy_sort(&row_a, &row_b, "name"), Ordering::Less);
    assert_eq!(fuzzy_sort(&row_b, &row_a, "name"), Ordering::Greater);
}

#[test]
fn test_view_orders_by_match_then_clears() {
    let records = vec![
        Record::with_id("1").set("name", "Ivan Kevin"),
        Record::with_id("2").set("name", "Kevin Ivan"),
        Record::with_id("3").set("name", "Alex Kowalczyk"),
    ];
    let mut view = TableView::new(vec![Column::new("name", "Name")]).unwrap();
    view.sort_by("name", false).unwrap();

    view.set_global_filter("kevin");
    let rows = view.rows(&records);
    assert_eq!(names(&rows), vec!["Kevin Ivan", "Ivan Kevin"]);
    assert_eq!(rows[0].meta().get("name").unwrap().rank, Rank::StartsWith);

    view.clear_global_filter();
    let rows = view.rows(&records);
    assert_eq!(names(&rows), vec!["Alex Kowalczyk", "Ivan Kevin", "Kevin Ivan"]);
    assert!(rows.iter().all(|r| r.meta().is_empty()));
}

#[test]
fn test_view_without_sort_keeps_fetch_order() {
    let records = vec![
        Record::with_id("1").set("name", "b"),
        Record::with_id("2").set("name", "a"),
    ];
    let view = TableView::new(vec![Column::new("name", "Name")]).unwrap();

    let ids: Vec<_> = view.rows(&records).iter().filter_map(|r| r.record().id()).collect();
    assert_eq!(ids, vec!["1", "2"]);
}
