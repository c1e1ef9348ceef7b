//! Domain model for a resident's meal subscription.

use anyhow::anyhow;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanType {
    Single,
    Both,
}

impl PlanType {
    /// Maximum number of check-ins allowed in one day
    pub fn daily_quota(&self) -> u8 {
        match self {
            PlanType::Single => 1,
            PlanType::Both => 2,
        }
    }

    /// Days consumed from the balance by one check-in
    pub fn charge_per_meal(&self) -> f64 {
        match self {
            PlanType::Single => 1.0,
            PlanType::Both => 0.5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::Single => "single",
            PlanType::Both => "both",
        }
    }

    /// Label used on printed reports
    pub fn meal_label(&self) -> &'static str {
        match self {
            PlanType::Single => "Lunch",
            PlanType::Both => "Lunch, Dinner",
        }
    }
}

impl FromStr for PlanType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(PlanType::Single),
            "both" => Ok(PlanType::Both),
            other => Err(anyhow!("Unknown plan type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubscriptionStatus {
    Active,
    Inactive,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Inactive => "inactive",
        }
    }
}

impl FromStr for SubscriptionStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(SubscriptionStatus::Active),
            "inactive" => Ok(SubscriptionStatus::Inactive),
            other => Err(anyhow!("Unknown subscription status: {}", other)),
        }
    }
}

/// A resident's subscription. Exactly one per resident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub reg_code: String,
    /// Length of the last purchased plan in days
    pub number_of_days: u32,
    pub renew_date: NaiveDate,
    /// Fractional days left; check-ins are refused once this reaches zero
    pub remaining_balance: f64,
    pub plan_type: PlanType,
    pub status: SubscriptionStatus,
}

impl Subscription {
    pub fn is_expired(&self) -> bool {
        self.remaining_balance <= 0.0
    }

    /// Date the plan runs out if every remaining whole day is used
    pub fn expected_end_date(&self) -> NaiveDate {
        let whole_days = self.remaining_balance.max(0.0).trunc() as u64;
        self.renew_date
            .checked_add_days(chrono::Days::new(whole_days))
            .unwrap_or(self.renew_date)
    }
}
