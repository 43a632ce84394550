//! Admin report endpoints over a seeded on-disk database.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use triage::report::ReportEngine;
use triage::store::SqliteStore;
use triage::web::{router, AppState, TokenGate};

const TOKEN: &str = "t0ken";

fn state() -> (Arc<AppState>, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("hospital.db");
    let store = SqliteStore::open(&db_path).unwrap();
    store.init_schema().unwrap();
    store.seed().unwrap();

    let state = AppState {
        db_path,
        engine: ReportEngine::default(),
        gate: Arc::new(TokenGate::new(vec![TOKEN.to_string()], "triage_session")),
        login_url: "/login".to_string(),
        page_size: 4,
    };
    (Arc::new(state), dir)
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn send(state: &Arc<AppState>, req: Request<Body>) -> Response<Body> {
    router(Arc::clone(state)).oneshot(req).await.unwrap()
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn unauthenticated_requests_redirect_to_login() {
    let (state, _dir) = state();
    for uri in [
        "/admin/reports",
        "/admin/reports/patients",
        "/admin/reports/patients/view?id=1",
        "/admin/reports/patients/export?format=csv",
        "/admin/reports/nonexistent/export?format=bogus",
    ] {
        let response = send(&state, get(uri, None)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");
        assert!(body_text(response).await.is_empty());
    }

    let response = send(&state, get("/admin/reports", Some("wrong"))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn session_cookie_is_accepted() {
    let (state, _dir) = state();
    let req = Request::builder()
        .uri("/admin/reports")
        .header(header::COOKIE, format!("triage_session={TOKEN}"))
        .body(Body::empty())
        .unwrap();
    let response = send(&state, req).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn csv_export_is_an_attachment() {
    let (state, _dir) = state();
    let response = send(
        &state,
        get(
            "/admin/reports/appointments/export?format=csv&status=completed&start_date=2024-01-01&end_date=2024-01-31",
            Some(TOKEN),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/csv; charset=utf-8"
    );
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"appointments_export_"));
    assert!(disposition.ends_with(".csv\""));

    let text = body_text(response).await;
    assert!(text.contains("Total Appointments,3\r\n"));
    assert!(text.contains("Completed,3\r\n"));
}

#[tokio::test]
async fn document_export_is_inline_html() {
    let (state, _dir) = state();
    let response = send(
        &state,
        get("/admin/reports/invoices/export?format=excel", Some(TOKEN)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/html; charset=utf-8"
    );
    let disposition = response.headers().get(header::CONTENT_DISPOSITION).unwrap();
    let disposition = disposition.to_str().unwrap();
    assert!(disposition.starts_with("inline; filename=\"invoices_report_"));
    assert!(disposition.ends_with(".html\""));
    assert!(body_text(response).await.contains("<h1>Invoices Report</h1>"));
}

#[tokio::test]
async fn pdf_export_suggests_pdf_filename() {
    let (state, _dir) = state();
    let response = send(
        &state,
        get("/admin/reports/invoices/export?format=pdf", Some(TOKEN)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/html; charset=utf-8"
    );
    let disposition = response.headers().get(header::CONTENT_DISPOSITION).unwrap();
    let disposition = disposition.to_str().unwrap();
    assert!(disposition.starts_with("inline; filename=\"invoices_report_"));
    assert!(disposition.ends_with(".pdf\""));
}

#[tokio::test]
async fn unknown_format_is_bad_request() {
    let (state, _dir) = state();
    let response = send(
        &state,
        get("/admin/reports/patients/export?format=unknown", Some(TOKEN)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "Invalid export format: unknown");
}

#[tokio::test]
async fn unknown_entity_is_not_found() {
    let (state, _dir) = state();
    let response = send(&state, get("/admin/reports/wards/export", Some(TOKEN))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn detail_fragment_and_validation_errors() {
    let (state, _dir) = state();

    let response = send(&state, get("/admin/reports/doctors/view?id=1", Some(TOKEN))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<h3>Doctor #1</h3>"));
    assert!(html.contains("Dr. Amelia Hart"));

    let response = send(&state, get("/admin/reports/doctors/view", Some(TOKEN))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_text(response).await,
        "<div class=\"alert alert-error\">No doctor id provided</div>\n"
    );

    let response = send(&state, get("/admin/reports/doctors/view?id=999", Some(TOKEN))).await;
    assert!(body_text(response).await.contains("Doctor #999 not found"));
}

#[tokio::test]
async fn listing_fragment_is_paginated() {
    let (state, _dir) = state();
    let response = send(
        &state,
        get("/admin/reports/appointments?page=2", Some(TOKEN)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Page 2 of 2 (6 records)"));
    assert_eq!(html.matches("<tr><td>").count(), 2);
}

#[tokio::test]
async fn report_index_lists_entities() {
    let (state, _dir) = state();
    let response = send(&state, get("/admin/reports", Some(TOKEN))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    let entities: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["entity"].as_str().unwrap())
        .collect();
    assert_eq!(
        entities,
        vec!["appointments", "departments", "doctors", "invoices", "patients", "staff"]
    );
    assert_eq!(body[0]["filters"][0]["name"], "search");
}
