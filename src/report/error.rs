//! Report errors.

use crate::store::StoreError;

/// Errors surfaced by the report engine.
///
/// The `Display` text is what an end user may see; store detail stays in
/// [`ReportError::ReportGeneration::cause`] for logging.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Missing or unusable request input, e.g. no `id` for a detail view.
    #[error("{0}")]
    Validation(String),

    #[error("Administrator access required")]
    Authorization,

    #[error("Report generation failed")]
    ReportGeneration {
        #[source]
        cause: StoreError,
    },

    #[error("Invalid export format: {0}")]
    InvalidFormat(String),

    #[error("Unknown report: {0}")]
    UnknownEntity(String),

    #[error("Report generation failed")]
    Encoding(String),
}

impl From<StoreError> for ReportError {
    fn from(cause: StoreError) -> Self {
        ReportError::ReportGeneration { cause }
    }
}

impl From<csv::Error> for ReportError {
    fn from(e: csv::Error) -> Self {
        ReportError::Encoding(e.to_string())
    }
}

pub type ReportResult<T> = Result<T, ReportError>;
