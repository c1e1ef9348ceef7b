//! # REST API Interface Layer
//!
//! HTTP endpoints of the mess admin backend. Handlers map the `shared` DTOs
//! to domain commands, call a service, and map results back. Domain errors
//! become 400 / 404 / 409, anything else a generic 500.

pub mod attendance_apis;
pub mod error;
pub mod guest_apis;
pub mod mappers;
pub mod payment_apis;
pub mod report_apis;
pub mod resident_apis;
pub mod subscription_apis;
