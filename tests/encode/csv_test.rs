//! CSV encoder layout and quoting.

use std::collections::HashMap;

use chrono::NaiveDate;
use proptest::prelude::*;
use triage::encode::csv::{encode, BOM};
use triage::report::{
    entities, AdminContext, ColumnSpec, ExportOptions, FilterSet, QueryDescriptor, ReportData,
    ReportEngine, ReportRow, SummaryBlock,
};
use triage::sql::{col, TableRef};
use triage::store::SqliteStore;

fn seeded() -> SqliteStore {
    let store = SqliteStore::open_in_memory().unwrap();
    store.init_schema().unwrap();
    store.seed().unwrap();
    store
}

fn no_bom() -> ExportOptions {
    ExportOptions {
        csv_bom: false,
        ..ExportOptions::default()
    }
}

/// Header block and data block are separated by the first blank line.
fn data_section(bytes: &[u8]) -> &[u8] {
    let pos = bytes
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("blank separator line");
    &bytes[pos + 4..]
}

#[test]
fn test_patient_export_quoting() {
    let store = seeded();
    let ctx = AdminContext::new(true, &store);
    let engine = ReportEngine::new(no_bom());
    let ts = NaiveDate::from_ymd_opt(2024, 2, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();

    let artifact = engine
        .export(&ctx, &entities::patients(), &HashMap::new(), Some("csv"), ts)
        .unwrap();
    let text = String::from_utf8(artifact.into_bytes()).unwrap();

    assert!(text.starts_with("Patients Report\r\nGenerated,2024-02-01 09:00:00\r\n"));
    assert!(text.contains("Total Patients,4\r\n"));
    assert!(text.contains(
        "3,\"Robert Smith, \"\"Bob\"\"\",N/A,555-1003,male,1975-12-01,N/A,\"7 Pine Road\nRear entrance\",active,2024-01-09\r\n"
    ));
    // Nulls in the address column render empty.
    assert!(text.contains(",yuki.t@mail.example,N/A,female,2015-06-18,B+,,inactive,2024-02-11\r\n"));
}

#[test]
fn test_filters_line_and_bom() {
    let store = seeded();
    let ctx = AdminContext::new(true, &store);
    let request: HashMap<String, String> =
        [("status".to_string(), "completed".to_string())].into_iter().collect();
    let ts = NaiveDate::from_ymd_opt(2024, 2, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();

    let artifact = ReportEngine::default()
        .export(&ctx, &entities::appointments(), &request, None, ts)
        .unwrap();
    let bytes = artifact.bytes();

    assert!(bytes.starts_with(BOM));
    let text = String::from_utf8_lossy(&bytes[BOM.len()..]);
    assert!(text.contains("Filters applied,Status: completed\r\n"));
    assert!(text.contains("Completion Rate,100.0%\r\n"));
}

#[test]
fn test_detail_rows_parse_back() {
    let store = seeded();
    let ctx = AdminContext::new(true, &store);
    let d = entities::invoices();
    let data = ReportEngine::new(no_bom())
        .run(&ctx, &d, FilterSet::default(), None)
        .unwrap();
    let ts = NaiveDate::from_ymd_opt(2024, 2, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    let bytes = encode(&d, &data, &no_bom(), ts).unwrap();

    let mut reader = csv::ReaderBuilder::new().from_reader(data_section(&bytes));
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        d.columns.iter().map(|c| c.label).collect::<Vec<_>>()
    );
    let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(records.len(), data.rows.len());
    assert_eq!(&records[0][1], "INV-2024-0003");
    assert_eq!(&records[0][5], "175.50");
}

fn text_descriptor() -> QueryDescriptor {
    QueryDescriptor::new("notes", "Notes", TableRef::new("notes"), col("id")).columns(vec![
        ColumnSpec::new("a", "A", col("a")),
        ColumnSpec::new("b", "B", col("b")),
        ColumnSpec::new("c", "C", col("c")),
    ])
}

proptest! {
    #[test]
    fn prop_csv_round_trip(
        values in prop::collection::vec(
            prop::array::uniform3(r#"[a-zA-Z0-9 ,";'\r\n]{0,12}"#),
            0..8,
        )
    ) {
        let d = text_descriptor();
        let rows: Vec<ReportRow> = values
            .iter()
            .map(|[a, b, c]| {
                ReportRow::new()
                    .with("a", a.as_str())
                    .with("b", b.as_str())
                    .with("c", c.as_str())
            })
            .collect();
        let data = ReportData {
            summary: SummaryBlock::compute(&d, &rows),
            total_rows: rows.len(),
            rows,
            filters: FilterSet::default(),
            page: None,
        };
        let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let bytes = encode(&d, &data, &no_bom(), ts).unwrap();

        let mut reader = csv::ReaderBuilder::new().from_reader(data_section(&bytes));
        let parsed: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect();
        let expected: Vec<Vec<String>> = values.iter().map(|row| row.to_vec()).collect();
        prop_assert_eq!(parsed, expected);
    }
}
