//! HTML fragments loaded into the admin pages' modals.

use super::{cell_html, escape_html};
use crate::format;
use crate::report::{QueryDescriptor, ReportData, ReportRow};

/// Listing fragment: stat grid, optional filter line, table and page indicator.
pub fn listing(descriptor: &QueryDescriptor, data: &ReportData) -> String {
    let mut html = String::new();
    html.push_str(&format!(
        "<div class=\"report-fragment\" data-entity=\"{}\">\n",
        escape_html(descriptor.entity)
    ));

    if !data.summary.is_empty() {
        html.push_str("  <div class=\"stat-grid\">\n");
        for (label, value) in data.summary.iter() {
            html.push_str(&format!(
                "    <div class=\"stat\"><span class=\"stat-label\">{}</span> <span class=\"stat-value\">{}</span></div>\n",
                escape_html(label),
                escape_html(&value.display())
            ));
        }
        html.push_str("  </div>\n");
    }

    if let Some(applied) = data.filters.describe() {
        html.push_str(&format!(
            "  <p class=\"filters\">Filters applied: {}</p>\n",
            escape_html(&applied)
        ));
    }

    if data.rows.is_empty() {
        html.push_str("  <p class=\"empty\">No records found.</p>\n");
    } else {
        html.push_str("  <table class=\"table\">\n    <thead><tr>");
        for column in &descriptor.columns {
            html.push_str(&format!("<th>{}</th>", escape_html(column.label)));
        }
        html.push_str("</tr></thead>\n    <tbody>\n");
        for row in &data.rows {
            html.push_str("      <tr>");
            for column in &descriptor.columns {
                html.push_str(&format!("<td>{}</td>", cell_html(column, row.value(column.name))));
            }
            html.push_str("</tr>\n");
        }
        html.push_str("    </tbody>\n  </table>\n");
    }

    if let Some(page) = data.page {
        html.push_str(&format!(
            "  <div class=\"pagination\">Page {} of {} ({} records)</div>\n",
            page.number,
            data.page_count(),
            data.total_rows
        ));
    }

    html.push_str("</div>\n");
    html
}

/// Detail fragment: one label/value row per column.
pub fn detail(descriptor: &QueryDescriptor, row: &ReportRow) -> String {
    let mut html = String::new();
    let id = descriptor
        .columns
        .first()
        .map(|c| c.display(row.value(c.name)))
        .unwrap_or_default();

    html.push_str("<div class=\"record-detail\">\n");
    html.push_str(&format!(
        "  <h3>{} #{}</h3>\n",
        escape_html(&format::humanize(descriptor.record_noun())),
        escape_html(&id)
    ));
    html.push_str("  <table class=\"table detail\">\n");
    for column in &descriptor.columns {
        html.push_str(&format!(
            "    <tr><th>{}</th><td>{}</td></tr>\n",
            escape_html(column.label),
            cell_html(column, row.value(column.name))
        ));
    }
    html.push_str("  </table>\n</div>\n");
    html
}

/// Inline error shown inside the modal in place of content.
pub fn error(message: &str) -> String {
    format!(
        "<div class=\"alert alert-error\">{}</div>\n",
        escape_html(message)
    )
}
