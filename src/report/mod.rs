//! Filtered reporting: descriptors, filters, summaries and the export engine.
//!
//! A report request flows through three stages:
//!
//! 1. **Filter** - raw request parameters become a [`FilterSet`] of typed
//!    predicates, each bound through [`crate::sql::Params`].
//! 2. **Execute** - the [`ReportEngine`] compiles the entity's
//!    [`QueryDescriptor`] with that WHERE clause and runs it against the
//!    store in the caller's [`AdminContext`].
//! 3. **Encode** - rows and the [`SummaryBlock`] computed over the same rows
//!    go to the CSV or printable document encoder.

mod artifact;
mod descriptor;
mod engine;
pub mod entities;
mod error;
mod filter;
mod summary;
mod value;

pub use artifact::{Disposition, ExportArtifact, ExportFormat};
pub use descriptor::{Aggregate, ColumnSpec, Formatter, QueryDescriptor, SortKey, SummarySpec};
pub use engine::{AdminContext, ExportOptions, Page, ReportData, ReportEngine};
pub use error::{ReportError, ReportResult};
pub use filter::{
    escape_like, Comparison, FilterInput, FilterSet, FilterSpec, FilterValue, ParamKind, Predicate,
    LIKE_ESCAPE,
};
pub use summary::{SummaryBlock, SummaryValue};
pub use value::{ReportRow, Value};
