//! Filter builder behavior against the real entity descriptors.

use std::collections::HashMap;

use proptest::prelude::*;
use triage::report::{entities, FilterSet, FilterValue};
use triage::sql::{Dialect, ParamValue, Params};

fn raw(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_empty_request_has_no_where_clause() {
    let d = entities::appointments();
    let filters = FilterSet::from_params(&d.filters, &HashMap::new());
    let mut params = Params::new();

    assert!(filters.is_empty());
    assert!(filters.where_clause(&mut params).is_none());
    assert!(params.is_empty());
    assert!(filters.describe().is_none());

    let sql = d.select_query(None).to_sql(Dialect::Sqlite);
    assert!(!sql.contains("WHERE"));
}

#[test]
fn test_blank_and_unknown_params_are_ignored() {
    let d = entities::appointments();
    let filters = FilterSet::from_params(
        &d.filters,
        &raw(&[("status", "   "), ("search", ""), ("colour", "blue")]),
    );
    assert!(filters.is_empty());
}

#[test]
fn test_values_are_trimmed() {
    let d = entities::appointments();
    let filters = FilterSet::from_params(&d.filters, &raw(&[("status", "  completed ")]));
    assert_eq!(
        filters.get("status").map(|p| &p.value),
        Some(&FilterValue::Single("completed".to_string()))
    );
}

#[test]
fn test_params_bound_in_predicate_order() {
    let d = entities::appointments();
    let filters = FilterSet::from_params(
        &d.filters,
        &raw(&[
            ("end_date", "2024-01-31"),
            ("status", "completed"),
            ("start_date", "2024-01-01"),
            ("doctor_id", "2"),
        ]),
    );
    let mut params = Params::new();
    let compiled = d
        .select_query(filters.where_clause(&mut params))
        .compile(Dialect::Postgres, &params)
        .unwrap();

    assert_eq!(
        compiled.params,
        vec![
            ParamValue::Text("completed".into()),
            ParamValue::Integer(2),
            ParamValue::Text("2024-01-01".into()),
            ParamValue::Text("2024-01-31".into()),
        ]
    );
    assert!(compiled.sql.contains("\"a\".\"status\" = $1"));
    assert!(compiled.sql.contains("\"a\".\"doctor_id\" = $2"));
    assert!(compiled.sql.contains("BETWEEN $3 AND $4"));
}

#[test]
fn test_non_numeric_id_binds_as_text() {
    let d = entities::appointments();
    let filters = FilterSet::from_params(&d.filters, &raw(&[("doctor_id", "abc")]));
    let mut params = Params::new();
    filters.where_clause(&mut params);
    assert_eq!(params.values(), &[ParamValue::Text("abc".into())]);
}

#[test]
fn test_open_date_range() {
    let d = entities::appointments();
    let mut params = Params::new();

    let from = FilterSet::from_params(&d.filters, &raw(&[("start_date", "2024-02-01")]));
    let sql = d
        .select_query(from.where_clause(&mut params))
        .to_sql(Dialect::Sqlite);
    assert!(sql.contains("\"a\".\"appointment_date\" >= ?1"));
    assert_eq!(from.describe().as_deref(), Some("Date: from 2024-02-01"));

    let until = FilterSet::from_params(&d.filters, &raw(&[("end_date", "2024-02-01")]));
    assert_eq!(until.describe().as_deref(), Some("Date: until 2024-02-01"));
}

#[test]
fn test_search_spans_every_target_column() {
    let d = entities::appointments();
    let filters = FilterSet::from_params(&d.filters, &raw(&[("search", "50%_off")]));
    let mut params = Params::new();
    let sql = d
        .select_query(filters.where_clause(&mut params))
        .to_sql(Dialect::Sqlite);

    assert_eq!(params.len(), 5);
    assert!(params
        .values()
        .iter()
        .all(|p| p == &ParamValue::Text("%50\\%\\_off%".into())));
    assert_eq!(sql.matches(" LIKE ").count(), 5);
    assert_eq!(sql.matches(" OR ").count(), 4);
}

#[test]
fn test_describe_joins_predicates() {
    let d = entities::appointments();
    let filters = FilterSet::from_params(
        &d.filters,
        &raw(&[
            ("status", "completed"),
            ("start_date", "2024-01-01"),
            ("end_date", "2024-01-31"),
        ]),
    );
    assert_eq!(
        filters.describe().as_deref(),
        Some("Status: completed; Date: 2024-01-01 to 2024-01-31")
    );
}

#[test]
fn test_experience_range_on_doctors() {
    let d = entities::doctors();
    let filters = FilterSet::from_params(&d.filters, &raw(&[("min_experience", "10")]));
    let mut params = Params::new();
    let sql = d
        .select_query(filters.where_clause(&mut params))
        .to_sql(Dialect::Sqlite);
    assert!(sql.contains("\"d\".\"experience_years\" >= ?1"));
    assert_eq!(params.values(), &[ParamValue::Integer(10)]);
    assert_eq!(filters.describe().as_deref(), Some("Experience: at least 10"));
}

proptest! {
    /// Request values only ever reach the query as bound parameters.
    #[test]
    fn prop_sql_text_independent_of_values(
        status in "[ -~]{1,24}",
        search in "[ -~]{1,24}",
    ) {
        prop_assume!(!status.trim().is_empty() && !search.trim().is_empty());
        let d = entities::appointments();

        let compile = |status: &str, search: &str| {
            let filters = FilterSet::from_params(
                &d.filters,
                &raw(&[("status", status), ("search", search)]),
            );
            let mut params = Params::new();
            d.select_query(filters.where_clause(&mut params))
                .compile(Dialect::Sqlite, &params)
                .unwrap()
        };

        let candidate = compile(&status, &search);
        let baseline = compile("x", "y");
        prop_assert_eq!(&candidate.sql, &baseline.sql);
        prop_assert_eq!(candidate.params.len(), 6);
        prop_assert_eq!(&candidate.params[5], &ParamValue::Text(status.trim().to_string()));
    }
}
