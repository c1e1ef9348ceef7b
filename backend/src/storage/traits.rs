//! # Storage Traits
//!
//! Storage abstraction used by the attendance engine, so check-ins can be
//! exercised against SQLite or an in-memory double without modification.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::activity::{Activity, AttendanceState};
use crate::domain::models::subscription::Subscription;

/// Read and write access to the state a check-in depends on
#[async_trait]
pub trait AttendanceStorage: Send + Sync {
    /// Load the subscription and activity of a resident by (uppercase) registration code
    async fn load_attendance_state(&self, reg_code: &str) -> Result<Option<AttendanceState>>;

    /// Persist an accepted check-in.
    ///
    /// Both rows are written in one transaction: a later read observes
    /// both writes or neither.
    async fn save_check_in(&self, subscription: &Subscription, activity: &Activity) -> Result<()>;
}
