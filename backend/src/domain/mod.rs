//! # Domain Module
//!
//! Business logic of the mess admin backend: residents, their meal
//! subscriptions and payments, guest bills, reports and the attendance
//! engine that decides meal check-ins.
//!
//! ## Module Organization
//!
//! - **attendance**: pure check-in decision (quota and meal-slot rules)
//! - **attendance_service**: loads state, decides, persists
//! - **resident_locks**: per-resident lock shared by every service that
//!   rewrites a balance
//! - **resident_service / subscription_service / payment_service /
//!   guest_service / report_service**: validated CRUD and reports
//! - **commands**: internal command and result types the REST layer maps to
//! - **errors**: typed failures (`Validation`, `NotFound`, `Conflict`)
//!
//! Services work on domain models and storage repositories only; they know
//! nothing about HTTP or the `shared` DTOs.

pub mod attendance;
pub mod attendance_service;
pub mod commands;
pub mod errors;
pub mod guest_service;
pub mod models;
pub mod payment_service;
pub mod report_service;
pub mod resident_locks;
pub mod resident_service;
pub mod subscription_service;
pub mod validation;

pub use attendance_service::{AttendanceOutcome, AttendanceService};
pub use errors::DomainError;
pub use guest_service::GuestService;
pub use payment_service::PaymentService;
pub use report_service::ReportService;
pub use resident_locks::ResidentLocks;
pub use resident_service::ResidentService;
pub use subscription_service::SubscriptionService;
