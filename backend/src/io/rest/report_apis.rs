//! # REST API for Reports
//!
//! JSON data for the printable report sheets.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::info;

use crate::io::rest::error::{bad_request, error_response};
use crate::io::rest::mappers::report_mapper::ReportMapper;
use crate::io::rest::payment_apis::DateRangeParams;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/new-residents", get(new_residents_report))
        .route("/pending-payments", get(pending_payments_report))
}

pub async fn new_residents_report(
    State(state): State<AppState>,
    Query(params): Query<DateRangeParams>,
) -> impl IntoResponse {
    info!("GET /api/reports/new-residents - params: {:?}", params);

    let (start_date, end_date) = match params.required() {
        Ok(range) => range,
        Err(message) => return bad_request(message),
    };

    let query = ReportMapper::to_new_resident_query(start_date, end_date);
    match state.report_service.new_residents_report(query).await {
        Ok(report) => (StatusCode::OK, Json(ReportMapper::to_new_resident_dto(report))).into_response(),
        Err(e) => error_response("build new resident report", e),
    }
}

pub async fn pending_payments_report(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/reports/pending-payments");

    match state.report_service.pending_payments_report().await {
        Ok(report) => (StatusCode::OK, Json(ReportMapper::to_pending_payments_dto(report))).into_response(),
        Err(e) => error_response("build pending payments report", e),
    }
}
