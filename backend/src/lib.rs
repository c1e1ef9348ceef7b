//! # Mess Admin Backend
//!
//! HTTP backend for running a mess or hostel kitchen: resident onboarding,
//! meal-plan subscriptions, payments, guest bills, reports and daily
//! attendance marking.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (axum REST handlers, DTO mappers)
//!     ↓
//! Domain Layer (services, attendance engine)
//!     ↓
//! Storage Layer (SQLite repositories)
//! ```
//!
//! The binary wires these together from an [`config::AppConfig`]; tests build
//! the same router over an in-memory database.

pub mod config;
pub mod domain;
pub mod io;
pub mod logging;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    response::Json,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{
    AttendanceService, GuestService, PaymentService, ReportService, ResidentLocks, ResidentService,
    SubscriptionService,
};
use crate::io::rest::{attendance_apis, guest_apis, payment_apis, report_apis, resident_apis, subscription_apis};
use crate::storage::{
    AttendanceRepository, DbConnection, GuestRepository, PaymentRepository, ResidentRepository,
    SubscriptionRepository,
};
use shared::HealthResponse;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub attendance_service: AttendanceService,
    pub resident_service: ResidentService,
    pub subscription_service: SubscriptionService,
    pub payment_service: PaymentService,
    pub guest_service: GuestService,
    pub report_service: ReportService,
}

impl AppState {
    /// Build every service over one database connection pool
    pub fn new(db: DbConnection) -> Self {
        let residents = ResidentRepository::new(db.clone());
        let payments = PaymentRepository::new(db.clone());
        // One lock table for every service that rewrites a resident's balance
        let locks = Arc::new(ResidentLocks::new());

        Self {
            attendance_service: AttendanceService::new(
                Arc::new(AttendanceRepository::new(db.clone())),
                locks.clone(),
            ),
            resident_service: ResidentService::new(residents.clone(), locks.clone()),
            subscription_service: SubscriptionService::new(SubscriptionRepository::new(db.clone()), locks),
            payment_service: PaymentService::new(payments.clone(), residents.clone()),
            guest_service: GuestService::new(GuestRepository::new(db)),
            report_service: ReportService::new(residents, payments),
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database");
    let db = DbConnection::new(&config.database_url).await?;

    info!("Setting up application state");
    Ok(AppState::new(db))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, allowed_origin: Option<&str>) -> Result<Router> {
    let cors = match allowed_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(
                origin
                    .parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin: {}", origin))?,
            )
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers(Any),
        None => CorsLayer::new(),
    };

    let resident_routes = resident_apis::router()
        .merge(subscription_apis::router())
        .merge(payment_apis::resident_router());

    let api_routes = Router::new()
        .route("/health", get(health))
        .nest("/attendance", attendance_apis::router())
        .nest("/residents", resident_routes)
        .nest("/payments", payment_apis::router())
        .nest("/guests", guest_apis::router())
        .nest("/reports", report_apis::router());

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
