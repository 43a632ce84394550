//! Printable HTML document encoder.
//!
//! Produces one self-contained HTML page (embedded stylesheet, no external
//! assets) meant to be printed to PDF from a browser. This is not a PDF
//! generator: `pdf`, `excel` and `xlsx` requests all land here and the user
//! saves the page through the browser's print dialog.

use chrono::NaiveDateTime;

use super::{cell_html, escape_html};
use crate::format;
use crate::report::{ExportOptions, QueryDescriptor, ReportData};

pub const MIME_TYPE: &str = "text/html; charset=utf-8";

const STYLESHEET: &str = r#"
        * { box-sizing: border-box; }
        body {
            font-family: -apple-system, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
            font-size: 12px;
            color: #2c3e50;
            margin: 0;
            padding: 24px;
        }
        .report-header {
            border-bottom: 3px solid #2a7ab0;
            padding-bottom: 12px;
            margin-bottom: 20px;
        }
        .organization {
            font-size: 11px;
            text-transform: uppercase;
            letter-spacing: 0.08em;
            color: #7f8c8d;
        }
        h1 {
            margin: 4px 0;
            font-size: 22px;
        }
        .generated, .filters {
            color: #555;
            margin: 2px 0;
        }
        .print-note {
            color: #888;
            font-style: italic;
        }
        .stat-grid {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(150px, 1fr));
            gap: 10px;
            margin-bottom: 20px;
        }
        .stat {
            border: 1px solid #dde3e8;
            border-left: 4px solid #2a7ab0;
            border-radius: 4px;
            padding: 8px 10px;
        }
        .stat-label {
            font-size: 11px;
            color: #7f8c8d;
        }
        .stat-value {
            font-size: 18px;
            font-weight: bold;
        }
        table.detail {
            width: 100%;
            border-collapse: collapse;
        }
        table.detail th {
            background-color: #34495e;
            color: #fff;
            text-align: left;
            padding: 6px 8px;
        }
        table.detail td {
            border-bottom: 1px solid #e5e8eb;
            padding: 5px 8px;
            vertical-align: top;
            white-space: pre-line;
        }
        table.detail tr:nth-child(even) td { background-color: #f7f9fa; }
        .status {
            display: inline-block;
            padding: 1px 6px;
            border-radius: 8px;
            background-color: #ecf0f1;
        }
        .status-active, .status-completed, .status-paid { background-color: #d4f4e2; color: #1e7b48; }
        .status-scheduled, .status-pending, .status-partial { background-color: #fdf2d0; color: #8a6d0b; }
        .status-cancelled, .status-overdue, .status-inactive { background-color: #fbe0de; color: #a93226; }
        .empty {
            padding: 16px;
            text-align: center;
            color: #888;
        }
        .report-footer {
            margin-top: 16px;
            color: #888;
            font-size: 11px;
        }
        @media print {
            body { padding: 0; }
            .print-note { display: none; }
            thead { display: table-header-group; }
            tr { page-break-inside: avoid; }
        }
"#;

/// Render the full document.
pub fn encode(
    descriptor: &QueryDescriptor,
    data: &ReportData,
    options: &ExportOptions,
    generated_at: NaiveDateTime,
) -> String {
    let mut html = String::new();
    let title = escape_html(descriptor.title);

    html.push_str(&format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n    <meta charset=\"UTF-8\">\n    <title>{title}</title>\n    <style>{STYLESHEET}    </style>\n</head>\n<body>\n"
    ));

    // Header
    html.push_str("<header class=\"report-header\">\n");
    html.push_str(&format!(
        "  <div class=\"organization\">{}</div>\n",
        escape_html(&options.organization)
    ));
    html.push_str(&format!("  <h1>{title}</h1>\n"));
    html.push_str(&format!(
        "  <div class=\"generated\">Generated: {}</div>\n",
        format::timestamp(generated_at)
    ));
    if let Some(applied) = data.filters.describe() {
        html.push_str(&format!(
            "  <div class=\"filters\">Filters applied: {}</div>\n",
            escape_html(&applied)
        ));
    }
    html.push_str(
        "  <p class=\"print-note\">Printable report. Use your browser's Print dialog to save as PDF.</p>\n",
    );
    html.push_str("</header>\n");

    // Summary
    if !data.summary.is_empty() {
        html.push_str("<section class=\"stat-grid\">\n");
        for (label, value) in data.summary.iter() {
            html.push_str("  <div class=\"stat\">\n");
            html.push_str(&format!(
                "    <div class=\"stat-label\">{}</div>\n",
                escape_html(label)
            ));
            html.push_str(&format!(
                "    <div class=\"stat-value\">{}</div>\n",
                escape_html(&value.display())
            ));
            html.push_str("  </div>\n");
        }
        html.push_str("</section>\n");
    }

    // Detail table
    html.push_str("<table class=\"detail\">\n  <thead>\n    <tr>\n");
    for column in &descriptor.columns {
        html.push_str(&format!("      <th>{}</th>\n", escape_html(column.label)));
    }
    html.push_str("    </tr>\n  </thead>\n  <tbody>\n");
    for row in &data.rows {
        html.push_str("    <tr>\n");
        for column in &descriptor.columns {
            html.push_str(&format!(
                "      <td>{}</td>\n",
                cell_html(column, row.value(column.name))
            ));
        }
        html.push_str("    </tr>\n");
    }
    html.push_str("  </tbody>\n</table>\n");

    if data.rows.is_empty() {
        html.push_str("<p class=\"empty\">No records match the selected filters.</p>\n");
    }

    html.push_str(&format!(
        "<footer class=\"report-footer\">Total records: {}</footer>\n",
        data.rows.len()
    ));

    if options.document_auto_print {
        html.push_str("<script>window.addEventListener('load', function () { window.print(); });</script>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}
