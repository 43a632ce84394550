//! Axum server for the admin report endpoints.
//!
//! Handlers run the synchronous engine inside `spawn_blocking`, each with its
//! own SQLite connection opened for the request and dropped when it ends.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use super::gate::{SessionGate, TokenGate};
use crate::config::{Settings, SettingsError};
use crate::encode::fragment;
use crate::report::{
    entities, AdminContext, ExportFormat, FilterSet, Page, QueryDescriptor, ReportEngine, ReportError,
};
use crate::store::SqliteStore;

/// Application state shared across handlers.
pub struct AppState {
    /// SQLite database file.
    pub db_path: PathBuf,
    pub engine: ReportEngine,
    pub gate: Arc<dyn SessionGate>,
    pub login_url: String,
    /// Rows per page in fragment listings.
    pub page_size: u64,
}

impl AppState {
    pub fn from_settings(settings: &Settings) -> Result<Self, SettingsError> {
        Ok(Self {
            db_path: settings.database.resolved_path()?,
            engine: ReportEngine::new(settings.to_export_options()),
            gate: Arc::new(TokenGate::new(
                settings.auth.resolved_tokens()?,
                settings.auth.session_cookie.clone(),
            )),
            login_url: settings.auth.login_url.clone(),
            page_size: settings.export.page_size,
        })
    }

    fn login_redirect(&self) -> Response {
        Redirect::to(&self.login_url).into_response()
    }
}

/// Build the axum router with all routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/admin/reports", get(list_reports))
        .route("/admin/reports/{entity}", get(listing))
        .route("/admin/reports/{entity}/view", get(view_record))
        .route("/admin/reports/{entity}/export", get(export))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the web server.
pub async fn serve(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::from_settings(settings)?;

    // Create tables up front so the first request doesn't race on it.
    SqliteStore::open(&state.db_path)?.init_schema()?;

    let db_path = state.db_path.clone();
    let app = router(Arc::new(state));
    let listener = tokio::net::TcpListener::bind(&settings.server.bind).await?;

    tracing::info!(
        bind = %settings.server.bind,
        database = %db_path.display(),
        "triage reports listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

/// Run `job` against a fresh per-request store on the blocking pool.
async fn with_store<T, F>(state: &Arc<AppState>, job: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&AppState, &AdminContext<'_>) -> Result<T, ReportError> + Send + 'static,
{
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || {
        let store = SqliteStore::open(&state.db_path).map_err(ReportError::from)?;
        let ctx = AdminContext::new(true, &store);
        job(&state, &ctx)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))?
    .map_err(ApiError::from)
}

fn resolve(entity: &str) -> Result<QueryDescriptor, ApiError> {
    entities::lookup(entity).ok_or_else(|| ReportError::UnknownEntity(entity.to_string()).into())
}

// ============================================================================
// Handlers
// ============================================================================

#[derive(Serialize)]
struct FilterInfo {
    name: &'static str,
    label: &'static str,
    params: Vec<&'static str>,
}

#[derive(Serialize)]
struct ReportInfo {
    entity: &'static str,
    title: &'static str,
    columns: Vec<&'static str>,
    filters: Vec<FilterInfo>,
    formats: [&'static str; 2],
}

/// GET /admin/reports - Available reports and the filters each accepts
async fn list_reports(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if !state.gate.is_authorized(&headers) {
        return state.login_redirect();
    }

    let reports: Vec<ReportInfo> = entities::all()
        .into_iter()
        .map(|d| ReportInfo {
            entity: d.entity,
            title: d.title,
            columns: d.columns.iter().map(|c| c.label).collect(),
            filters: d
                .filters
                .iter()
                .map(|f| FilterInfo {
                    name: f.name,
                    label: f.label,
                    params: f.param_names(),
                })
                .collect(),
            formats: ["csv", "document"],
        })
        .collect();

    Json(reports).into_response()
}

/// GET /admin/reports/{entity} - Paginated listing fragment
async fn listing(
    State(state): State<Arc<AppState>>,
    Path(entity): Path<String>,
    Query(raw): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    if !state.gate.is_authorized(&headers) {
        return Ok(state.login_redirect());
    }
    let descriptor = resolve(&entity)?;

    let html = with_store(&state, move |state, ctx| {
        let page = Page::from_param(raw.get("page").map(String::as_str), state.page_size);
        let filters = FilterSet::from_params(&descriptor.filters, &raw);
        let data = state.engine.run(ctx, &descriptor, filters, Some(page))?;
        Ok(fragment::listing(&descriptor, &data))
    })
    .await?;

    Ok(Html(html).into_response())
}

/// GET /admin/reports/{entity}/view?id=N - Record detail fragment
async fn view_record(
    State(state): State<Arc<AppState>>,
    Path(entity): Path<String>,
    Query(raw): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    if !state.gate.is_authorized(&headers) {
        return Ok(state.login_redirect());
    }
    let descriptor = resolve(&entity)?;

    let html = with_store(&state, move |state, ctx| {
        let row = state
            .engine
            .fetch_record(ctx, &descriptor, raw.get("id").map(String::as_str))?;
        Ok(fragment::detail(&descriptor, &row))
    })
    .await?;

    Ok(Html(html).into_response())
}

/// GET /admin/reports/{entity}/export?format=... - CSV download or printable document
async fn export(
    State(state): State<Arc<AppState>>,
    Path(entity): Path<String>,
    Query(raw): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    if !state.gate.is_authorized(&headers) {
        return Ok(state.login_redirect());
    }
    let descriptor = resolve(&entity)?;
    ExportFormat::from_param(raw.get("format").map(String::as_str))?;
    let generated_at = chrono::Local::now().naive_local();

    let artifact = with_store(&state, move |state, ctx| {
        let format = raw.get("format").map(String::as_str);
        state
            .engine
            .export(ctx, &descriptor, &raw, format, generated_at)
    })
    .await?;

    let head = [
        (header::CONTENT_TYPE, artifact.mime_type().to_string()),
        (header::CONTENT_DISPOSITION, artifact.content_disposition()),
        (header::CACHE_CONTROL, "no-store".to_string()),
    ];
    Ok((head, artifact.into_bytes()).into_response())
}
