//! # REST API for Resident Management
//!
//! Endpoints for onboarding, listing, viewing and editing residents.
//! Subscription and payment routes of a resident are nested under
//! `/api/residents/:code` by their own modules.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::info;

use crate::domain::models::resident::Resident;
use crate::io::rest::error::{bad_request, error_response};
use crate::io::rest::mappers::resident_mapper::ResidentMapper;
use crate::AppState;
use shared::{CreateResidentRequest, UpdateResidentRequest};

#[derive(Debug, Deserialize)]
pub struct ExistsParams {
    pub reg_code: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_residents).post(create_resident))
        .route("/exists", get(resident_exists))
        .route("/:code", get(get_resident).put(update_resident))
}

/// Onboard a new resident
pub async fn create_resident(
    State(state): State<AppState>,
    Json(request): Json<CreateResidentRequest>,
) -> impl IntoResponse {
    info!("POST /api/residents - reg_code: {}", request.reg_code);

    let command = ResidentMapper::to_create_command(request);
    match state.resident_service.create_resident(command).await {
        Ok(result) => (StatusCode::CREATED, Json(ResidentMapper::to_resident_response(result))).into_response(),
        Err(e) => error_response("create resident", e),
    }
}

pub async fn list_residents(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/residents");

    match state.resident_service.list_residents().await {
        Ok(residents) => (StatusCode::OK, Json(ResidentMapper::to_list_dto(residents))).into_response(),
        Err(e) => error_response("list residents", e),
    }
}

/// Whether a registration code is taken
pub async fn resident_exists(
    State(state): State<AppState>,
    Query(params): Query<ExistsParams>,
) -> impl IntoResponse {
    info!("GET /api/residents/exists - params: {:?}", params);

    let Some(reg_code) = params.reg_code.filter(|code| !code.trim().is_empty()) else {
        return bad_request("reg_code is required");
    };

    match state.resident_service.resident_exists(&reg_code).await {
        Ok(exists) => {
            let reg_code = Resident::normalize_reg_code(&reg_code);
            (StatusCode::OK, Json(ResidentMapper::to_exists_dto(reg_code, exists))).into_response()
        }
        Err(e) => error_response("check resident", e),
    }
}

pub async fn get_resident(State(state): State<AppState>, Path(code): Path<String>) -> impl IntoResponse {
    info!("GET /api/residents/{}", code);

    match state.resident_service.get_resident(&code).await {
        Ok(profile) => (StatusCode::OK, Json(ResidentMapper::to_dto(profile))).into_response(),
        Err(e) => error_response("get resident", e),
    }
}

pub async fn update_resident(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(request): Json<UpdateResidentRequest>,
) -> impl IntoResponse {
    info!("PUT /api/residents/{}", code);

    let command = ResidentMapper::to_update_command(code, request);
    match state.resident_service.update_resident(command).await {
        Ok(result) => (StatusCode::OK, Json(ResidentMapper::to_resident_response(result))).into_response(),
        Err(e) => error_response("update resident", e),
    }
}
