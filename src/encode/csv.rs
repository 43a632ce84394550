//! CSV export encoder.
//!
//! Layout, one CRLF-terminated record per line:
//!
//! ```text
//! <title>
//! Generated,<timestamp>
//! Filters applied,<description>      (only when filters are active)
//! <summary label>,<summary value>    (one per summary entry)
//!                                     (blank line)
//! <column labels>
//! <data rows>
//! ```
//!
//! Quoting is RFC 4180 via the `csv` crate: a field is quoted only when it
//! contains a delimiter, quote or line break, and embedded quotes are doubled.

use std::io::Write;

use chrono::NaiveDateTime;
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::format;
use crate::report::{ExportOptions, QueryDescriptor, ReportData, ReportResult};

pub const MIME_TYPE: &str = "text/csv; charset=utf-8";

/// UTF-8 byte-order mark, for spreadsheet applications.
pub const BOM: &[u8] = b"\xEF\xBB\xBF";

fn writer<W: Write>(out: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .flexible(true)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::CRLF)
        .from_writer(out)
}

pub fn encode(
    descriptor: &QueryDescriptor,
    data: &ReportData,
    options: &ExportOptions,
    generated_at: NaiveDateTime,
) -> ReportResult<Vec<u8>> {
    let mut out = Vec::new();
    if options.csv_bom {
        out.extend_from_slice(BOM);
    }

    {
        let mut w = writer(&mut out);
        w.write_record([descriptor.title])?;
        w.write_record(["Generated", format::timestamp(generated_at).as_str()])?;
        if let Some(applied) = data.filters.describe() {
            w.write_record(["Filters applied", applied.as_str()])?;
        }
        for (label, value) in data.summary.iter() {
            w.write_record([label, value.display().as_str()])?;
        }
        w.flush().map_err(csv::Error::from)?;
    }

    // A zero-field record would be written as `""`; the separator line must be empty.
    out.extend_from_slice(b"\r\n");

    {
        let mut w = writer(&mut out);
        w.write_record(descriptor.columns.iter().map(|c| c.label))?;
        for row in &data.rows {
            w.write_record(
                descriptor
                    .columns
                    .iter()
                    .map(|c| c.display(row.value(c.name))),
            )?;
        }
        w.flush().map_err(csv::Error::from)?;
    }

    Ok(out)
}
