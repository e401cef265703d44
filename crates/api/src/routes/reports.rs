//! Report routes.
//!
//! Each request runs one report session: request the period, fetch the
//! payload, derive the view. Upstream failures are not HTTP errors here; the
//! session lands in `no_data` and the body says why.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tally_core::reports::{ReportKind, ReportProfile, ReportSession, ViewParams};
use tally_shared::AppError;
use tally_shared::types::ReportPeriod;
use tracing::{error, info};

use super::error_response;
use crate::AppState;

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports", get(list_reports))
        .route("/reports/{kind}", get(get_report))
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters for a report view.
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    /// Period start, `YYYY-MM-DD`.
    pub from_date: Option<String>,
    /// Period end, `YYYY-MM-DD`.
    pub to_date: Option<String>,
    /// Free-text search.
    pub q: Option<String>,
    /// Whether zero-amount rows are shown (defaults to config).
    pub include_zero: Option<bool>,
}

// ============================================================================
// Response Types
// ============================================================================

/// One entry of the report list.
#[derive(Debug, Serialize)]
pub struct ReportKindResponse {
    /// URL segment.
    pub kind: ReportKind,
    /// Rollup rules the report uses.
    pub profile: ReportProfile,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /reports
async fn list_reports() -> Json<Vec<ReportKindResponse>> {
    Json(
        ReportKind::ALL
            .into_iter()
            .map(|kind| ReportKindResponse {
                kind,
                profile: kind.profile(),
            })
            .collect(),
    )
}

/// GET /reports/{kind}?from_date=..&to_date=..&q=..&include_zero=..
async fn get_report(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Response {
    let kind = match kind.parse::<ReportKind>() {
        Ok(kind) => kind,
        Err(e) => return error_response(&AppError::NotFound(e.to_string())),
    };

    let period = match parse_period(&query) {
        Ok(period) => period,
        Err(e) => return error_response(&e),
    };

    let params = ViewParams::new(
        query.q.unwrap_or_default(),
        query.include_zero.unwrap_or(state.reports.include_zero),
    );
    let mut session = ReportSession::new(kind, params);
    session.request(period);

    match state.source.fetch_input(kind, period).await {
        Ok(input) => {
            session.receive(period, input);
        }
        Err(e) => {
            error!(
                error = %e,
                report = %kind,
                source = state.source.name(),
                "Failed to fetch report payload"
            );
            session.fail(period, AppError::from(e).to_string());
        }
    }

    let snapshot = session.snapshot();
    info!(report = %kind, state = ?snapshot.state, "Served report");
    Json(snapshot).into_response()
}

fn parse_period(query: &ReportQuery) -> Result<ReportPeriod, AppError> {
    match (query.from_date.as_deref(), query.to_date.as_deref()) {
        (Some(from), Some(to)) => Ok(ReportPeriod::parse(from, to)?),
        _ => Err(AppError::Validation(
            "from_date and to_date are required".to_string(),
        )),
    }
}
