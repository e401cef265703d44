//! Integration tests for the HTTP report source against a local stub server.

use std::collections::HashMap;

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tally_core::reports::ReportKind;
use tally_shared::config::HttpSourceConfig;
use tally_shared::types::ReportPeriod;
use tally_source::{HttpReportSource, ReportSource, SourceError};

/// Stub upstream: echoes the query and auth header back inside `totals`.
async fn report(
    Path(kind): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    if kind == "cash-book" {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }
    if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("Bearer s3cret") {
        return Err(StatusCode::UNAUTHORIZED);
    }
    let from = params.get("from_date").cloned().unwrap_or_default();
    let to = params.get("to_date").cloned().unwrap_or_default();
    Ok(Json(json!({
        "rows": [
            { "voucher": "REC-1", "ledger": "Cash", "debit": 200, "narration": from },
            { "voucher": "REC-1", "ledger": "Fees", "credit": 150, "narration": to }
        ]
    })))
}

/// Spawn the stub on an ephemeral port and return its base URL.
async fn spawn_upstream() -> String {
    let app = Router::new().route("/api/reports/{kind}", get(report));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub");
    let addr = listener.local_addr().expect("Failed to read stub address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Stub server failed");
    });
    format!("http://{addr}/api")
}

fn source(base_url: String, token: Option<&str>) -> HttpReportSource {
    HttpReportSource::new(&HttpSourceConfig {
        base_url,
        token: token.map(str::to_string),
        timeout_secs: 5,
    })
    .expect("Failed to build client")
}

fn period() -> ReportPeriod {
    ReportPeriod::parse("2024-04-01", "2024-04-30").expect("valid period")
}

#[tokio::test]
async fn test_fetch_sends_period_and_token() {
    let base_url = spawn_upstream().await;
    let source = source(base_url, Some("s3cret"));

    let payload = source
        .fetch(ReportKind::Vouchers, period())
        .await
        .expect("Failed to fetch");
    assert_eq!(payload.rows.len(), 2);
    assert_eq!(payload.rows[0].narration.as_deref(), Some("2024-04-01"));
    assert_eq!(payload.rows[1].narration.as_deref(), Some("2024-04-30"));

    let input = source
        .fetch_input(ReportKind::Vouchers, period())
        .await
        .expect("Failed to fetch");
    assert_eq!(input.records[0].group_key.as_deref(), Some("REC-1"));
}

#[tokio::test]
async fn test_missing_token_is_rejected() {
    let base_url = spawn_upstream().await;
    let source = source(base_url, None);

    let err = source
        .fetch(ReportKind::Vouchers, period())
        .await
        .unwrap_err();
    assert!(matches!(err, SourceError::Status(401)));
}

#[tokio::test]
async fn test_upstream_failure_status() {
    let base_url = spawn_upstream().await;
    let source = source(base_url, Some("s3cret"));

    let err = source
        .fetch(ReportKind::CashBook, period())
        .await
        .unwrap_err();
    assert!(matches!(err, SourceError::Status(503)));
}

#[tokio::test]
async fn test_unreachable_upstream_is_http_error() {
    let source = source("http://127.0.0.1:9".to_string(), None);
    let err = source
        .fetch(ReportKind::TrialBalance, period())
        .await
        .unwrap_err();
    assert!(matches!(err, SourceError::Http(_)));
}
