//! Domain models for residents and their contact details.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::subscription::Subscription;

/// A paying mess member, keyed by registration code (always uppercase).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resident {
    pub reg_code: String,
    pub first_name: String,
    pub last_name: String,
    pub guardian_first_name: String,
    pub guardian_last_name: String,
    pub joining_date: NaiveDate,
}

impl Resident {
    /// Registration codes are matched case-insensitively by uppercasing
    pub fn normalize_reg_code(reg_code: &str) -> String {
        reg_code.trim().to_uppercase()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub reg_code: String,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: String,
    pub guardian_phone: String,
}

/// Resident with everything the profile screen shows
#[derive(Debug, Clone, PartialEq)]
pub struct ResidentProfile {
    pub resident: Resident,
    pub contact: Contact,
    pub subscription: Subscription,
}

/// Row of the resident list
#[derive(Debug, Clone, PartialEq)]
pub struct ResidentSummary {
    pub reg_code: String,
    pub first_name: String,
    pub last_name: String,
    pub remaining_balance: f64,
    pub renew_date: NaiveDate,
}
