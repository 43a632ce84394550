//! Mapping of report errors onto HTTP responses.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::encode::fragment;
use crate::report::ReportError;

/// Errors returned by the report handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("Internal error: {0}")]
    Internal(String),
}

const GENERATION_FAILED: &str = "Report generation failed";

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, content_type, body) = match &self {
            // Shown inside the modal, so the request itself succeeds.
            ApiError::Report(ReportError::Validation(message)) => (
                StatusCode::OK,
                "text/html; charset=utf-8",
                fragment::error(message),
            ),
            ApiError::Report(ReportError::Authorization) => (
                StatusCode::FORBIDDEN,
                "text/plain; charset=utf-8",
                self.to_string(),
            ),
            ApiError::Report(ReportError::InvalidFormat(_)) => (
                StatusCode::BAD_REQUEST,
                "text/plain; charset=utf-8",
                self.to_string(),
            ),
            ApiError::Report(ReportError::UnknownEntity(_)) => (
                StatusCode::NOT_FOUND,
                "text/plain; charset=utf-8",
                self.to_string(),
            ),
            ApiError::Report(ReportError::ReportGeneration { cause }) => {
                tracing::error!(%cause, "report generation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "text/plain; charset=utf-8",
                    GENERATION_FAILED.to_string(),
                )
            }
            ApiError::Report(ReportError::Encoding(detail)) | ApiError::Internal(detail) => {
                tracing::error!(detail, "report generation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "text/plain; charset=utf-8",
                    GENERATION_FAILED.to_string(),
                )
            }
        };

        (status, [(header::CONTENT_TYPE, content_type)], body).into_response()
    }
}
