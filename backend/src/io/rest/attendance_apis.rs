//! # REST API for Attendance
//!
//! Check-in endpoint used by the front desk. Every domain outcome, including
//! refusals, is a 200 with `success` telling them apart.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::info;

use crate::io::rest::error::{bad_request, error_response};
use crate::io::rest::mappers::attendance_mapper::AttendanceMapper;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct MarkAttendanceParams {
    pub reg_code: Option<String>,
    /// Caller's ISO-8601 "now"
    pub at: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/mark", get(mark_attendance))
}

/// Mark one meal check-in
pub async fn mark_attendance(
    State(state): State<AppState>,
    Query(params): Query<MarkAttendanceParams>,
) -> impl IntoResponse {
    info!("GET /api/attendance/mark - params: {:?}", params);

    let Some(reg_code) = params.reg_code.filter(|code| !code.trim().is_empty()) else {
        return bad_request("reg_code is required");
    };
    let Some(at) = params.at.filter(|at| !at.trim().is_empty()) else {
        return bad_request("at is required");
    };

    let command = AttendanceMapper::to_command(reg_code, at);
    match state.attendance_service.mark_attendance(command).await {
        Ok(result) => (StatusCode::OK, Json(AttendanceMapper::to_response(result))).into_response(),
        Err(e) => error_response("mark attendance", e),
    }
}
