//! Query execution contract and export orchestration.
//!
//! Every entry point follows the same steps: check authorization, validate
//! the request shape (format, id), build the filter set, and only then touch
//! the store. A failure at any step returns before an artifact exists.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use super::artifact::{document_extension, Disposition, ExportArtifact, ExportFormat};
use super::descriptor::QueryDescriptor;
use super::error::{ReportError, ReportResult};
use super::filter::FilterSet;
use super::summary::SummaryBlock;
use super::value::ReportRow;
use crate::encode::{csv as csv_encoder, document};
use crate::format;
use crate::sql::{Expr, ParamValue, Params, Query};
use crate::store::{DataStore, StoreError};

/// Request-scoped context: who is asking and which store to read.
///
/// Built once at the boundary and passed down; the engine reads no ambient
/// state.
#[derive(Clone, Copy)]
pub struct AdminContext<'a> {
    authorized: bool,
    store: &'a dyn DataStore,
}

impl<'a> AdminContext<'a> {
    pub fn new(authorized: bool, store: &'a dyn DataStore) -> Self {
        Self { authorized, store }
    }

    pub fn is_authorized(&self) -> bool {
        self.authorized
    }

    fn store(&self) -> ReportResult<&'a dyn DataStore> {
        if self.authorized {
            Ok(self.store)
        } else {
            Err(ReportError::Authorization)
        }
    }
}

/// A page of a fragment listing, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: u64,
    pub size: u64,
}

impl Page {
    /// Parse a `page` request value; anything unusable means page 1.
    pub fn from_param(value: Option<&str>, size: u64) -> Self {
        let number = value
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(1);
        Self {
            number,
            size: size.max(1),
        }
    }

    /// Rows skipped before this page, capped at the largest OFFSET a store
    /// accepts.
    fn offset(&self) -> u64 {
        const MAX_OFFSET: u64 = i64::MAX as u64;
        (self.number - 1).saturating_mul(self.size).min(MAX_OFFSET)
    }
}

/// Rows plus the summary computed over the same filters.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportData {
    pub rows: Vec<ReportRow>,
    pub summary: SummaryBlock,
    pub filters: FilterSet,
    /// Rows matching the filters; equal to `rows.len()` when unpaginated.
    pub total_rows: usize,
    pub page: Option<Page>,
}

impl ReportData {
    pub fn page_count(&self) -> u64 {
        match self.page {
            Some(p) => (self.total_rows as u64).div_ceil(p.size).max(1),
            None => 1,
        }
    }
}

/// Rendering switches for exports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Prepend a UTF-8 byte-order mark to CSV output.
    pub csv_bom: bool,
    /// Call `window.print()` when the document loads.
    pub document_auto_print: bool,
    /// Heading shown above document titles.
    pub organization: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            csv_bom: true,
            document_auto_print: true,
            organization: "Hospital Administration".to_string(),
        }
    }
}

/// Stateless report engine; holds only rendering options.
#[derive(Debug, Clone, Default)]
pub struct ReportEngine {
    options: ExportOptions,
}

impl ReportEngine {
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Run the descriptor's query under `filters`.
    ///
    /// Without a page, one query feeds both rows and summary. With a page,
    /// the detail query is limited and a second, unlimited query with the
    /// same WHERE clause and parameters feeds the summary.
    pub fn run(
        &self,
        ctx: &AdminContext<'_>,
        descriptor: &QueryDescriptor,
        filters: FilterSet,
        page: Option<Page>,
    ) -> ReportResult<ReportData> {
        let store = ctx.store()?;

        let mut params = Params::new();
        let where_clause = filters.where_clause(&mut params);
        let base = descriptor.select_query(where_clause);

        match page {
            None => {
                let rows = fetch_rows(store, descriptor, &base, &params)?;
                let summary = SummaryBlock::compute(descriptor, &rows);
                Ok(ReportData {
                    total_rows: rows.len(),
                    rows,
                    summary,
                    filters,
                    page: None,
                })
            }
            Some(p) => {
                let paged = base.clone().limit(p.size).offset(p.offset());
                let rows = fetch_rows(store, descriptor, &paged, &params)?;
                let all = fetch_rows(store, descriptor, &base, &params)?;
                let summary = SummaryBlock::compute(descriptor, &all);
                Ok(ReportData {
                    rows,
                    summary,
                    filters,
                    total_rows: all.len(),
                    page: Some(p),
                })
            }
        }
    }

    /// Build an export artifact from raw request parameters.
    ///
    /// `requested` is validated before any query runs. `generated_at` is the
    /// only input that varies between otherwise identical calls.
    pub fn export(
        &self,
        ctx: &AdminContext<'_>,
        descriptor: &QueryDescriptor,
        raw: &HashMap<String, String>,
        requested: Option<&str>,
        generated_at: NaiveDateTime,
    ) -> ReportResult<ExportArtifact> {
        ctx.store()?;
        let format = ExportFormat::from_param(requested)?;
        let filters = FilterSet::from_params(&descriptor.filters, raw);

        let data = self.run(ctx, descriptor, filters, None).inspect_err(|e| {
            if let ReportError::ReportGeneration { cause } = e {
                tracing::error!(entity = descriptor.entity, %cause, "report query failed");
            }
        })?;

        let artifact = match format {
            ExportFormat::Csv => {
                let bytes = csv_encoder::encode(descriptor, &data, &self.options, generated_at)?;
                ExportArtifact::new(
                    bytes,
                    csv_encoder::MIME_TYPE,
                    format!(
                        "{}_export_{}.csv",
                        descriptor.entity,
                        generated_at.format("%Y%m%d_%H%M%S")
                    ),
                    Disposition::Attachment,
                )
            }
            ExportFormat::Document => {
                let html = document::encode(descriptor, &data, &self.options, generated_at);
                ExportArtifact::new(
                    html.into_bytes(),
                    document::MIME_TYPE,
                    format!(
                        "{}_report_{}.{}",
                        descriptor.entity,
                        generated_at.format("%Y-%m-%d"),
                        document_extension(requested)
                    ),
                    Disposition::Inline,
                )
            }
        };

        tracing::info!(
            entity = descriptor.entity,
            %format,
            rows = data.rows.len(),
            filters = data.filters.len(),
            bytes = artifact.bytes().len(),
            "export generated"
        );
        Ok(artifact)
    }

    /// Fetch one record by primary key for a detail view.
    pub fn fetch_record(
        &self,
        ctx: &AdminContext<'_>,
        descriptor: &QueryDescriptor,
        id: Option<&str>,
    ) -> ReportResult<ReportRow> {
        let store = ctx.store()?;

        let noun = descriptor.record_noun();
        let id = id
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ReportError::Validation(format!("No {noun} id provided")))?;
        let id: i64 = id
            .parse()
            .map_err(|_| ReportError::Validation(format!("Invalid {noun} id: {id}")))?;

        let mut params = Params::new();
        let slot: Expr = params.bind(ParamValue::Integer(id));
        let query = descriptor.record_query(slot);
        let compiled = query
            .compile(store.dialect(), &params)
            .map_err(StoreError::from)?;

        let record = store
            .fetch_one(&compiled)
            .inspect_err(|cause| {
                tracing::error!(entity = descriptor.entity, %cause, "record lookup failed");
            })?
            .ok_or_else(|| {
                ReportError::Validation(format!("{} #{id} not found", format::humanize(noun)))
            })?;

        Ok(ReportRow::from_record(record, &descriptor.columns)?)
    }
}

fn fetch_rows(
    store: &dyn DataStore,
    descriptor: &QueryDescriptor,
    query: &Query,
    params: &Params,
) -> ReportResult<Vec<ReportRow>> {
    let compiled = query.compile(store.dialect(), params).map_err(StoreError::from)?;
    tracing::debug!(entity = descriptor.entity, sql = %compiled.sql, "report query");

    store
        .fetch_all(&compiled)?
        .into_iter()
        .map(|record| {
            ReportRow::from_record(record, &descriptor.columns).map_err(ReportError::from)
        })
        .collect()
}
