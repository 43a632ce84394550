//! Export formats and the finished artifact.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::error::ReportError;

/// Output format selector.
///
/// `pdf`, `excel` and `xlsx` are accepted as aliases of the printable
/// document, which is the only non-CSV output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Document,
}

impl ExportFormat {
    /// Parse an optional request value; absent or blank means CSV.
    pub fn from_param(value: Option<&str>) -> Result<Self, ReportError> {
        match value.map(str::trim) {
            None | Some("") => Ok(ExportFormat::Csv),
            Some(v) => v.parse(),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "document" | "pdf" | "excel" | "xlsx" | "print" => Ok(ExportFormat::Document),
            _ => Err(ReportError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Document => write!(f, "document"),
        }
    }
}

/// Extension of a document's suggested filename.
///
/// A `pdf` request is answered with a `.pdf` name as the print-to-PDF
/// affordance; the body is HTML for every document alias.
pub fn document_extension(requested: Option<&str>) -> &'static str {
    match requested.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("pdf") => "pdf",
        _ => "html",
    }
}

/// How the client should present the artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Disposition {
    Attachment,
    Inline,
}

/// Finished export. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    bytes: Vec<u8>,
    mime_type: &'static str,
    filename: String,
    disposition: Disposition,
}

impl ExportArtifact {
    pub(crate) fn new(
        bytes: Vec<u8>,
        mime_type: &'static str,
        filename: String,
        disposition: Disposition,
    ) -> Self {
        Self {
            bytes,
            mime_type,
            filename,
            disposition,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn disposition(&self) -> Disposition {
        self.disposition
    }

    /// `Content-Disposition` header value.
    pub fn content_disposition(&self) -> String {
        let kind = match self.disposition {
            Disposition::Attachment => "attachment",
            Disposition::Inline => "inline",
        };
        format!("{kind}; filename=\"{}\"", self.filename)
    }
}
