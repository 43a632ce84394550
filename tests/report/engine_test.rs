//! Query execution contract against the seeded SQLite store.

use std::cell::Cell;
use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;
use triage::report::{
    entities, AdminContext, Disposition, ExportOptions, FilterSet, ReportEngine, ReportError,
    SummaryValue, Value,
};
use triage::sql::{CompiledQuery, Dialect};
use triage::store::{DataStore, Record, SqliteStore, StoreError, StoreResult};

fn seeded() -> SqliteStore {
    let store = SqliteStore::open_in_memory().unwrap();
    store.init_schema().unwrap();
    store.seed().unwrap();
    store
}

fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 2, 1)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

fn raw(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn ids(rows: &[triage::report::ReportRow]) -> Vec<i64> {
    rows.iter()
        .filter_map(|r| match r.value("id") {
            Value::Integer(n) => Some(*n),
            _ => None,
        })
        .collect()
}

/// Counts every query it receives and fails them all.
struct SpyStore {
    calls: Cell<usize>,
}

impl SpyStore {
    fn new() -> Self {
        Self {
            calls: Cell::new(0),
        }
    }
}

impl DataStore for SpyStore {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn fetch_all(&self, _query: &CompiledQuery) -> StoreResult<Vec<Record>> {
        self.calls.set(self.calls.get() + 1);
        Err(StoreError::MissingColumn("spy".into()))
    }

    fn fetch_one(&self, _query: &CompiledQuery) -> StoreResult<Option<Record>> {
        self.calls.set(self.calls.get() + 1);
        Err(StoreError::MissingColumn("spy".into()))
    }
}

#[test]
fn test_completed_january_appointments() {
    let store = seeded();
    let ctx = AdminContext::new(true, &store);
    let d = entities::appointments();
    let filters = FilterSet::from_params(
        &d.filters,
        &raw(&[
            ("status", "completed"),
            ("start_date", "2024-01-01"),
            ("end_date", "2024-01-31"),
        ]),
    );

    let data = ReportEngine::default().run(&ctx, &d, filters, None).unwrap();

    assert_eq!(ids(&data.rows), vec![4, 2, 1]);
    assert_eq!(data.summary.get("Total Appointments"), Some(&SummaryValue::Count(3)));
    assert_eq!(data.summary.get("Completed"), Some(&SummaryValue::Count(3)));
    assert_eq!(data.summary.get("Cancelled"), Some(&SummaryValue::Count(0)));
    assert_eq!(
        data.summary.get("Completion Rate").map(SummaryValue::display),
        Some("100.0%".to_string())
    );
}

#[test]
fn test_default_order_without_filters() {
    let store = seeded();
    let ctx = AdminContext::new(true, &store);
    let engine = ReportEngine::default();

    let appointments = engine
        .run(&ctx, &entities::appointments(), FilterSet::default(), None)
        .unwrap();
    assert_eq!(ids(&appointments.rows), vec![6, 5, 4, 3, 2, 1]);

    let patients = engine
        .run(&ctx, &entities::patients(), FilterSet::default(), None)
        .unwrap();
    assert_eq!(ids(&patients.rows), vec![4, 3, 2, 1]);
}

#[test]
fn test_search_matches_wildcards_literally() {
    let store = seeded();
    let ctx = AdminContext::new(true, &store);
    let d = entities::appointments();

    let percent = FilterSet::from_params(&d.filters, &raw(&[("search", "100%")]));
    let data = ReportEngine::default().run(&ctx, &d, percent, None).unwrap();
    assert_eq!(ids(&data.rows), vec![3]);

    let by_doctor = FilterSet::from_params(&d.filters, &raw(&[("search", "hart")]));
    let data = ReportEngine::default().run(&ctx, &d, by_doctor, None).unwrap();
    assert_eq!(ids(&data.rows), vec![1]);
}

#[test]
fn test_id_filter() {
    let store = seeded();
    let ctx = AdminContext::new(true, &store);
    let d = entities::appointments();
    let filters = FilterSet::from_params(&d.filters, &raw(&[("doctor_id", "3")]));
    let data = ReportEngine::default().run(&ctx, &d, filters, None).unwrap();
    assert_eq!(ids(&data.rows), vec![5, 2]);
}

#[test]
fn test_summary_counts_the_exported_rows() {
    let store = seeded();
    let ctx = AdminContext::new(true, &store);
    let d = entities::invoices();

    for request in [
        raw(&[]),
        raw(&[("status", "pending")]),
        raw(&[("start_date", "2024-01-01")]),
    ] {
        let filters = FilterSet::from_params(&d.filters, &request);
        let data = ReportEngine::default().run(&ctx, &d, filters, None).unwrap();
        assert_eq!(
            data.summary.get("Total Invoices"),
            Some(&SummaryValue::Count(data.rows.len() as u64))
        );
    }
}

#[test]
fn test_invoice_money_summary() {
    let store = seeded();
    let ctx = AdminContext::new(true, &store);
    let d = entities::invoices();
    let data = ReportEngine::default()
        .run(&ctx, &d, FilterSet::default(), None)
        .unwrap();

    assert_eq!(
        data.summary.get("Total Billed").map(SummaryValue::display),
        Some("525.60".to_string())
    );
    assert_eq!(
        data.summary.get("Total Collected").map(SummaryValue::display),
        Some("210.00".to_string())
    );
}

#[test]
fn test_unknown_format_never_queries() {
    let spy = SpyStore::new();
    let ctx = AdminContext::new(true, &spy);
    let err = ReportEngine::default()
        .export(&ctx, &entities::patients(), &raw(&[]), Some("docx"), at(9, 0, 0))
        .unwrap_err();

    assert!(matches!(err, ReportError::InvalidFormat(ref f) if f == "docx"));
    assert_eq!(spy.calls.get(), 0);
}

#[test]
fn test_unauthorized_never_queries() {
    let spy = SpyStore::new();
    let ctx = AdminContext::new(false, &spy);
    let engine = ReportEngine::default();
    let d = entities::patients();

    let export = engine.export(&ctx, &d, &raw(&[]), Some("csv"), at(9, 0, 0));
    assert!(matches!(export, Err(ReportError::Authorization)));

    let record = engine.fetch_record(&ctx, &d, Some("1"));
    assert!(matches!(record, Err(ReportError::Authorization)));
    assert_eq!(spy.calls.get(), 0);
}

#[test]
fn test_store_failure_yields_no_artifact() {
    let spy = SpyStore::new();
    let ctx = AdminContext::new(true, &spy);
    let err = ReportEngine::default()
        .export(&ctx, &entities::patients(), &raw(&[]), Some("csv"), at(9, 0, 0))
        .unwrap_err();

    assert_eq!(err.to_string(), "Report generation failed");
    assert!(matches!(
        err,
        ReportError::ReportGeneration {
            cause: StoreError::MissingColumn(_)
        }
    ));
    assert_eq!(spy.calls.get(), 1);
}

#[test]
fn test_export_is_repeatable() {
    let store = seeded();
    let ctx = AdminContext::new(true, &store);
    let engine = ReportEngine::default();
    let d = entities::appointments();
    let request = raw(&[("status", "completed")]);

    for format in ["csv", "document"] {
        let first = engine.export(&ctx, &d, &request, Some(format), at(9, 0, 0)).unwrap();
        let again = engine.export(&ctx, &d, &request, Some(format), at(9, 0, 0)).unwrap();
        assert_eq!(first.bytes(), again.bytes());

        // Only the generation timestamp differs between runs.
        let later = engine.export(&ctx, &d, &request, Some(format), at(17, 45, 12)).unwrap();
        let strip = |bytes: &[u8]| -> Vec<String> {
            String::from_utf8_lossy(bytes)
                .lines()
                .filter(|l| !l.contains("Generated"))
                .map(str::to_string)
                .collect()
        };
        assert_eq!(strip(first.bytes()), strip(later.bytes()));
    }
}

#[test]
fn test_artifact_metadata() {
    let store = seeded();
    let ctx = AdminContext::new(true, &store);
    let engine = ReportEngine::default();
    let d = entities::staff();

    let csv = engine.export(&ctx, &d, &raw(&[]), None, at(9, 5, 7)).unwrap();
    assert_eq!(csv.filename(), "staff_export_20240201_090507.csv");
    assert_eq!(csv.mime_type(), "text/csv; charset=utf-8");
    assert_eq!(csv.disposition(), Disposition::Attachment);

    let pdf = engine.export(&ctx, &d, &raw(&[]), Some("pdf"), at(9, 5, 7)).unwrap();
    assert_eq!(pdf.filename(), "staff_report_2024-02-01.pdf");
    assert_eq!(pdf.mime_type(), "text/html; charset=utf-8");
    assert_eq!(pdf.disposition(), Disposition::Inline);

    for alias in ["excel", "xlsx", "DOCUMENT"] {
        let doc = engine.export(&ctx, &d, &raw(&[]), Some(alias), at(9, 5, 7)).unwrap();
        assert_eq!(doc.filename(), "staff_report_2024-02-01.html");
        assert_eq!(doc.mime_type(), "text/html; charset=utf-8");
        assert_eq!(doc.disposition(), Disposition::Inline);
    }
}

#[test]
fn test_export_options_are_applied() {
    let store = seeded();
    let ctx = AdminContext::new(true, &store);
    let engine = ReportEngine::new(ExportOptions {
        csv_bom: false,
        document_auto_print: false,
        organization: "Riverside General".to_string(),
    });
    let d = entities::departments();

    let csv = engine.export(&ctx, &d, &raw(&[]), Some("csv"), at(9, 0, 0)).unwrap();
    assert!(csv.bytes().starts_with(b"Departments Report\r\n"));

    let doc = engine.export(&ctx, &d, &raw(&[]), Some("document"), at(9, 0, 0)).unwrap();
    let html = String::from_utf8_lossy(doc.bytes());
    assert!(html.contains("Riverside General"));
    assert!(!html.contains("window.print()"));
}

#[test]
fn test_fetch_record_by_id() {
    let store = seeded();
    let ctx = AdminContext::new(true, &store);
    let engine = ReportEngine::default();

    let row = engine
        .fetch_record(&ctx, &entities::patients(), Some(" 3 "))
        .unwrap();
    assert_eq!(row.value("name"), &Value::from("Robert Smith, \"Bob\""));
    assert!(row.value("email").is_null());

    let err = engine
        .fetch_record(&ctx, &entities::staff(), Some("42"))
        .unwrap_err();
    assert_eq!(err.to_string(), "Staff Member #42 not found");
}
