//! Printable document output, and agreement with the CSV export.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use triage::report::{entities, AdminContext, ExportArtifact, ReportEngine};
use triage::store::SqliteStore;

fn seeded() -> SqliteStore {
    let store = SqliteStore::open_in_memory().unwrap();
    store.init_schema().unwrap();
    store.seed().unwrap();
    store
}

fn ts() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 2, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

fn export(entity: &str, request: &[(&str, &str)], format: &str) -> String {
    let store = seeded();
    let ctx = AdminContext::new(true, &store);
    let raw: HashMap<String, String> = request
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let descriptor = entities::lookup(entity).unwrap();
    let artifact: ExportArtifact = ReportEngine::default()
        .export(&ctx, &descriptor, &raw, Some(format), ts())
        .unwrap();
    String::from_utf8(artifact.into_bytes()).unwrap()
}

#[test]
fn test_document_structure() {
    let html = export(
        "appointments",
        &[
            ("status", "completed"),
            ("start_date", "2024-01-01"),
            ("end_date", "2024-01-31"),
        ],
        "pdf",
    );

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<h1>Appointments Report</h1>"));
    assert!(html.contains("Generated: 2024-02-01 09:00:00"));
    assert!(html.contains("Filters applied: Status: completed; Date: 2024-01-01 to 2024-01-31"));
    assert!(html.contains("<div class=\"stat-label\">Completed</div>\n    <div class=\"stat-value\">3</div>"));
    assert!(html.contains("Total records: 3"));
    assert!(html.contains("<span class=\"status status-completed\">completed</span>"));
    assert!(!html.contains("status-cancelled\">"));
    assert!(html.contains("window.print()"));
}

#[test]
fn test_document_escapes_record_text() {
    let html = export("patients", &[], "document");
    assert!(html.contains("<td>Robert Smith, &quot;Bob&quot;</td>"));
    assert!(!html.contains("Smith, \"Bob\""));
}

#[test]
fn test_empty_result_document() {
    let html = export("staff", &[("role", "surgeon")], "document");
    assert!(html.contains("No records match the selected filters."));
    assert!(html.contains("Total records: 0"));
    assert!(html.contains("<div class=\"stat-value\">0</div>"));
}

#[test]
fn test_money_renders_identically_in_both_formats() {
    let csv = export("invoices", &[], "csv");
    let html = export("invoices", &[], "document");

    for amount in ["150.00", "120.00", "60.00", "175.50", "80.10", "0.00", "525.60", "210.00"] {
        assert!(csv.contains(amount), "csv is missing {amount}");
        assert!(html.contains(amount), "document is missing {amount}");
    }
    assert!(csv.contains("Total Billed,525.60\r\n"));
    assert!(html.contains("<div class=\"stat-label\">Total Billed</div>\n    <div class=\"stat-value\">525.60</div>"));
}

#[test]
fn test_dates_render_identically_in_both_formats() {
    let csv = export("appointments", &[], "csv");
    let html = export("appointments", &[], "document");
    for shown in ["2024-01-05", "2024-02-14", "09:00", "16:15"] {
        assert!(csv.contains(shown));
        assert!(html.contains(shown));
    }
    // Missing appointment times use the column placeholder in both.
    assert!(csv.contains("6,2024-02-14,N/A,"));
    assert!(html.contains("<td>2024-02-14</td>\n      <td>N/A</td>"));
}
