//! # Triage
//!
//! Filtered reporting and export engine for hospital back-office data.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │        Request parameters (web query / CLI flags)        │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [report::FilterSet]
//! ┌─────────────────────────────────────────────────────────┐
//! │        Typed predicates + bound positional params        │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [report::ReportEngine + sql]
//! ┌─────────────────────────────────────────────────────────┐
//! │   Compiled SELECT (dialect placeholders) → DataStore     │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [report::SummaryBlock]
//! ┌─────────────────────────────────────────────────────────┐
//! │          Rows + summary over the same row set            │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [encode]
//! ┌─────────────────────────────────────────────────────────┐
//! │   CSV attachment │ printable HTML │ modal fragments      │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod encode;
pub mod format;
pub mod report;
pub mod sql;
pub mod store;

#[cfg(feature = "server")]
pub mod web;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::report::{
        entities, AdminContext, ExportArtifact, ExportFormat, ExportOptions, FilterSet,
        QueryDescriptor, ReportData, ReportEngine, ReportError, ReportResult, ReportRow,
        SummaryBlock, SummaryValue, Value,
    };
    pub use crate::sql::{CompiledQuery, Dialect, ParamValue, Params};
    pub use crate::store::{DataStore, Record, SqliteStore, StoreError, StoreValue};
}
