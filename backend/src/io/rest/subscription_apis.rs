//! # REST API for Subscriptions
//!
//! Routes nested under `/api/residents/:code/subscription`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use tracing::info;

use crate::io::rest::error::error_response;
use crate::io::rest::mappers::subscription_mapper::SubscriptionMapper;
use crate::AppState;
use shared::{RenewSubscriptionRequest, UpdateStatusRequest};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:code/subscription", get(get_subscription))
        .route("/:code/subscription/renew", post(renew_subscription))
        .route("/:code/subscription/status", put(update_status))
}

pub async fn get_subscription(State(state): State<AppState>, Path(code): Path<String>) -> impl IntoResponse {
    info!("GET /api/residents/{}/subscription", code);

    match state.subscription_service.get_subscription(&code).await {
        Ok(subscription) => (
            StatusCode::OK,
            Json(SubscriptionMapper::to_subscription_response(subscription)),
        )
            .into_response(),
        Err(e) => error_response("get subscription", e),
    }
}

/// Renew a plan and record its payment
pub async fn renew_subscription(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(request): Json<RenewSubscriptionRequest>,
) -> impl IntoResponse {
    info!("POST /api/residents/{}/subscription/renew - plan_days: {}", code, request.plan_days);

    let command = SubscriptionMapper::to_renew_command(code, request);
    match state.subscription_service.renew_subscription(command).await {
        Ok(result) => (StatusCode::OK, Json(SubscriptionMapper::to_renew_response(result))).into_response(),
        Err(e) => error_response("renew subscription", e),
    }
}

pub async fn update_status(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> impl IntoResponse {
    info!("PUT /api/residents/{}/subscription/status - status: {}", code, request.status);

    let command = SubscriptionMapper::to_status_command(code, request);
    match state.subscription_service.update_status(command).await {
        Ok(result) => (StatusCode::OK, Json(SubscriptionMapper::to_status_response(result))).into_response(),
        Err(e) => error_response("update subscription status", e),
    }
}
