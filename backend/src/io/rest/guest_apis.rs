//! # REST API for Guests
//!
//! Walk-in guest meal bills.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get},
    Router,
};
use tracing::info;

use crate::io::rest::error::error_response;
use crate::io::rest::mappers::guest_mapper::GuestMapper;
use crate::AppState;
use shared::CreateGuestRequest;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_guests).post(add_guest))
        .route("/:id", delete(delete_guest))
}

pub async fn add_guest(State(state): State<AppState>, Json(request): Json<CreateGuestRequest>) -> impl IntoResponse {
    info!("POST /api/guests - request: {:?}", request);

    match state.guest_service.add_guest(GuestMapper::to_command(request)).await {
        Ok(result) => (StatusCode::CREATED, Json(GuestMapper::to_guest_response(result))).into_response(),
        Err(e) => error_response("add guest", e),
    }
}

pub async fn list_guests(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/guests");

    match state.guest_service.list_guests().await {
        Ok(guests) => (StatusCode::OK, Json(GuestMapper::to_list_dto(guests))).into_response(),
        Err(e) => error_response("list guests", e),
    }
}

pub async fn delete_guest(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    info!("DELETE /api/guests/{}", id);

    match state.guest_service.delete_guest(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response("delete guest", e),
    }
}
