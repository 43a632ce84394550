//! Output encoders for report data.
//!
//! - [`csv`] - RFC 4180 export with a leading summary block
//! - [`document`] - self-contained printable HTML (print-to-PDF substitute)
//! - [`fragment`] - HTML snippets for the admin pages' listing and detail modals

pub mod csv;
pub mod document;
pub mod fragment;

use crate::format;
use crate::report::{ColumnSpec, Formatter, Value};

/// Escape text for HTML element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Inner HTML of one table cell. Status keywords get a `status-<slug>` badge.
pub(crate) fn cell_html(column: &ColumnSpec, value: &Value) -> String {
    let text = escape_html(&column.display(value));
    if column.formatter != Formatter::Status || value.is_null() {
        return text;
    }
    let slug = format::slug(&column.display(value));
    if slug.is_empty() {
        format!("<span class=\"status\">{text}</span>")
    } else {
        format!("<span class=\"status status-{slug}\">{text}</span>")
    }
}
