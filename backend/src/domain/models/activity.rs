//! Domain model for a resident's daily check-in counter.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Running counter of same-day check-ins. Exactly one per resident.
///
/// All fields start out empty at onboarding; only an accepted check-in
/// writes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub reg_code: String,
    pub last_active_date: Option<NaiveDate>,
    /// 0, 1 or 2 check-ins recorded on `last_active_date`
    pub last_count: Option<u8>,
    /// Wall-clock time of the last accepted check-in
    pub last_marked_at: Option<NaiveDateTime>,
}

impl Activity {
    pub fn empty(reg_code: &str) -> Self {
        Self {
            reg_code: reg_code.to_string(),
            last_active_date: None,
            last_count: None,
            last_marked_at: None,
        }
    }
}

/// Subscription and activity of one resident, read together for a check-in
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceState {
    pub subscription: super::subscription::Subscription,
    pub activity: Activity,
}
