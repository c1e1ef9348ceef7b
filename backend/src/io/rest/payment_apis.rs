//! # REST API for Payments
//!
//! Per-resident payment routes nest under `/api/residents`; the date-range
//! listing and bulk date change live under `/api/payments`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tracing::info;

use crate::io::rest::error::{bad_request, error_response};
use crate::io::rest::mappers::payment_mapper::PaymentMapper;
use crate::AppState;
use shared::{BulkPaymentDateRequest, UpdatePaymentRequest};

#[derive(Debug, Deserialize)]
pub struct DateRangeParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl DateRangeParams {
    /// Both bounds, or the name of the first missing one
    pub fn required(self) -> Result<(String, String), &'static str> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Ok((start, end)),
            (None, _) => Err("start_date is required"),
            (_, None) => Err("end_date is required"),
        }
    }
}

/// Routes mounted under `/api/residents`
pub fn resident_router() -> Router<AppState> {
    Router::new()
        .route("/:code/payments", get(list_payments))
        .route("/:code/payments/:id", get(get_payment).put(update_payment))
}

/// Routes mounted under `/api/payments`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_payments_between))
        .route("/bulk-date", post(bulk_update_payment_date))
}

pub async fn list_payments(State(state): State<AppState>, Path(code): Path<String>) -> impl IntoResponse {
    info!("GET /api/residents/{}/payments", code);

    match state.payment_service.list_payments(&code).await {
        Ok(payments) => (StatusCode::OK, Json(PaymentMapper::to_list_dto(payments))).into_response(),
        Err(e) => error_response("list payments", e),
    }
}

pub async fn get_payment(State(state): State<AppState>, Path((code, id)): Path<(String, i64)>) -> impl IntoResponse {
    info!("GET /api/residents/{}/payments/{}", code, id);

    match state.payment_service.get_payment(&code, id).await {
        Ok(payment) => (StatusCode::OK, Json(PaymentMapper::to_dto(payment))).into_response(),
        Err(e) => error_response("get payment", e),
    }
}

pub async fn update_payment(
    State(state): State<AppState>,
    Path((code, id)): Path<(String, i64)>,
    Json(request): Json<UpdatePaymentRequest>,
) -> impl IntoResponse {
    info!("PUT /api/residents/{}/payments/{} - request: {:?}", code, id, request);

    let command = PaymentMapper::to_update_command(code, id, request);
    match state.payment_service.update_payment(command).await {
        Ok(result) => (StatusCode::OK, Json(PaymentMapper::to_payment_response(result))).into_response(),
        Err(e) => error_response("update payment", e),
    }
}

/// Payments of all residents within an inclusive date range
pub async fn list_payments_between(
    State(state): State<AppState>,
    Query(params): Query<DateRangeParams>,
) -> impl IntoResponse {
    info!("GET /api/payments - params: {:?}", params);

    let (start_date, end_date) = match params.required() {
        Ok(range) => range,
        Err(message) => return bad_request(message),
    };

    let query = PaymentMapper::to_range_query(start_date, end_date);
    match state.payment_service.list_payments_between(query).await {
        Ok(payments) => (StatusCode::OK, Json(PaymentMapper::to_list_dto(payments))).into_response(),
        Err(e) => error_response("list payments", e),
    }
}

pub async fn bulk_update_payment_date(
    State(state): State<AppState>,
    Json(request): Json<BulkPaymentDateRequest>,
) -> impl IntoResponse {
    info!("POST /api/payments/bulk-date - request: {:?}", request);

    let command = PaymentMapper::to_bulk_date_command(request);
    match state.payment_service.bulk_update_payment_date(command).await {
        Ok(result) => (StatusCode::OK, Json(PaymentMapper::to_bulk_date_response(result))).into_response(),
        Err(e) => error_response("update payment dates", e),
    }
}
