//! # Attendance Engine
//!
//! Decides whether a meal check-in is allowed and computes the resulting
//! subscription and activity state. The decision is a pure function of the
//! current state and the check-in instant: nothing here reads a clock or
//! touches storage, so every transition is testable on plain values.
//!
//! ## Rules
//!
//! Checked in order, each rejection leaves state untouched:
//!
//! 1. `remaining_balance <= 0` is refused as expired
//! 2. an inactive subscription is refused
//! 3. on the same day as the last check-in, the plan's daily quota
//!    (1 for `single`, 2 for `both`) must not be used up
//! 4. a `both` plan may not check in twice in the same meal slot
//!    (lunch `[12:00, 18:00)`, dinner `[18:00, 24:00)`)
//!
//! A check-in on a new day resets the counter to 1. Each accepted check-in
//! consumes one day of balance on a `single` plan and half a day on `both`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};
use std::fmt;

use super::errors::DomainError;
use super::models::activity::{Activity, AttendanceState};
use super::models::subscription::{PlanType, Subscription, SubscriptionStatus};

pub const LUNCH_START_HOUR: u32 = 12;
pub const DINNER_START_HOUR: u32 = 18;

/// Meal slot of a `both` plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealSlot {
    Lunch,
    Dinner,
}

impl MealSlot {
    /// Slot the wall-clock instant falls in; `None` before lunch opens
    pub fn of(instant: NaiveDateTime) -> Option<Self> {
        let hour = instant.hour();
        if LUNCH_START_HOUR <= hour && hour < DINNER_START_HOUR {
            Some(MealSlot::Lunch)
        } else if DINNER_START_HOUR <= hour {
            Some(MealSlot::Dinner)
        } else {
            None
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MealSlot::Lunch => write!(f, "Lunch"),
            MealSlot::Dinner => write!(f, "Dinner"),
        }
    }
}

/// Why a check-in was refused
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    Expired,
    Inactive,
    QuotaExhausted(PlanType),
    SlotAlreadyMarked(MealSlot),
}

/// New state to persist for an accepted check-in
#[derive(Debug, Clone, PartialEq)]
pub struct CheckIn {
    pub subscription: Subscription,
    pub activity: Activity,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttendanceDecision {
    Rejected(Rejection),
    Accepted(CheckIn),
}

/// Decide a check-in at wall-clock time `observed` against the resident's state
pub fn decide(state: &AttendanceState, observed: NaiveDateTime) -> AttendanceDecision {
    let subscription = &state.subscription;
    let activity = &state.activity;

    if subscription.is_expired() {
        return AttendanceDecision::Rejected(Rejection::Expired);
    }
    if subscription.status == SubscriptionStatus::Inactive {
        return AttendanceDecision::Rejected(Rejection::Inactive);
    }

    let plan = subscription.plan_type;
    let today = observed.date();
    // A missing last_active_date counts as some earlier day
    let same_day = activity.last_active_date == Some(today);

    if !same_day {
        return AttendanceDecision::Accepted(check_in(subscription, activity, today, 1, observed));
    }

    let last_count = activity.last_count.unwrap_or(0);
    if last_count >= plan.daily_quota() {
        return AttendanceDecision::Rejected(Rejection::QuotaExhausted(plan));
    }

    if plan == PlanType::Both && last_count == 1 {
        if let Some(slot) = MealSlot::of(observed) {
            let previous_slot = activity
                .last_marked_at
                .filter(|previous| previous.date() == today)
                .and_then(MealSlot::of);
            if previous_slot == Some(slot) {
                return AttendanceDecision::Rejected(Rejection::SlotAlreadyMarked(slot));
            }
        }
    }

    AttendanceDecision::Accepted(check_in(subscription, activity, today, last_count + 1, observed))
}

fn check_in(
    subscription: &Subscription,
    activity: &Activity,
    today: NaiveDate,
    count: u8,
    observed: NaiveDateTime,
) -> CheckIn {
    CheckIn {
        subscription: Subscription {
            remaining_balance: subscription.remaining_balance - subscription.plan_type.charge_per_meal(),
            ..subscription.clone()
        },
        activity: Activity {
            reg_code: activity.reg_code.clone(),
            last_active_date: Some(today),
            last_count: Some(count),
            last_marked_at: Some(observed),
        },
    }
}

/// Parse the caller-supplied ISO-8601 "now".
///
/// Timestamps without an offset are local wall-clock time. Timestamps with an
/// offset keep their own wall-clock fields.
pub fn parse_observed_instant(value: &str) -> Result<NaiveDateTime, DomainError> {
    let value = value.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
        return Ok(with_offset.naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| parse_reduced_precision(value))
        .ok_or_else(|| DomainError::validation(format!("'{}' is not an ISO-8601 date-time", value)))
}

/// `YYYY-MM-DD` (midnight) and `YYYY-MM-DDTHH` (top of the hour)
fn parse_reduced_precision(value: &str) -> Option<NaiveDateTime> {
    let (date, hour) = match value.split_once('T') {
        Some((date, hour)) if hour.len() == 2 && hour.bytes().all(|b| b.is_ascii_digit()) => {
            (date, hour.parse().ok()?)
        }
        Some(_) => return None,
        None => (value, 0),
    };
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?.and_hms_opt(hour, 0, 0)
}
