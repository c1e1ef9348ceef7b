//! Check-in service wrapping the attendance engine.
//!
//! Loads the resident's state, runs [`decide`], and persists an accepted
//! check-in atomically. The resident's lock from the shared
//! [`ResidentLocks`] is held across the read-decide-write sequence.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use super::attendance::{decide, parse_observed_instant, AttendanceDecision, MealSlot, Rejection};
use super::commands::attendance::{MarkAttendanceCommand, MarkAttendanceResult};
use super::models::resident::Resident;
use super::models::subscription::PlanType;
use super::resident_locks::ResidentLocks;
use crate::storage::traits::AttendanceStorage;

/// What happened to a check-in. Every variant is an ordinary outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum AttendanceOutcome {
    NotFound,
    Expired,
    Inactive,
    QuotaExhausted { plan: PlanType },
    SlotAlreadyMarked { slot: MealSlot },
    Accepted { remaining_balance: f64, last_count: u8 },
}

impl AttendanceOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AttendanceOutcome::Accepted { .. })
    }

    /// Operator-facing message for the outcome
    pub fn message(&self, reg_code: &str) -> String {
        match self {
            AttendanceOutcome::NotFound => format!("Registration number {} does not exist", reg_code),
            AttendanceOutcome::Expired => format!("{}: subscription expired, please renew", reg_code),
            AttendanceOutcome::Inactive => {
                format!("{}: subscription is inactive, set the status to active first", reg_code)
            }
            AttendanceOutcome::QuotaExhausted { plan: PlanType::Single } => {
                format!("Attendance already marked, daily quota over for {} (single meal)", reg_code)
            }
            AttendanceOutcome::QuotaExhausted { plan: PlanType::Both } => {
                format!("Daily quota over for {} (both meals)", reg_code)
            }
            AttendanceOutcome::SlotAlreadyMarked { slot } => {
                format!("Attendance already marked for {} time for {}", slot, reg_code)
            }
            AttendanceOutcome::Accepted { remaining_balance, .. } => {
                format!("Attendance marked for {}, {} days left", reg_code, remaining_balance)
            }
        }
    }
}

impl From<Rejection> for AttendanceOutcome {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::Expired => AttendanceOutcome::Expired,
            Rejection::Inactive => AttendanceOutcome::Inactive,
            Rejection::QuotaExhausted(plan) => AttendanceOutcome::QuotaExhausted { plan },
            Rejection::SlotAlreadyMarked(slot) => AttendanceOutcome::SlotAlreadyMarked { slot },
        }
    }
}

/// Service for marking meal attendance
#[derive(Clone)]
pub struct AttendanceService {
    storage: Arc<dyn AttendanceStorage>,
    locks: Arc<ResidentLocks>,
}

impl AttendanceService {
    pub fn new(storage: Arc<dyn AttendanceStorage>, locks: Arc<ResidentLocks>) -> Self {
        Self { storage, locks }
    }

    /// Mark one check-in for a resident at the caller-supplied instant.
    ///
    /// Rejections are returned as outcomes. Only an unparsable timestamp
    /// or a storage failure is an error.
    pub async fn mark_attendance(&self, command: MarkAttendanceCommand) -> Result<MarkAttendanceResult> {
        let reg_code = Resident::normalize_reg_code(&command.reg_code);
        let observed = parse_observed_instant(&command.observed_at)?;
        info!("Marking attendance: reg_code={}, observed_at={}", reg_code, observed);

        let _guard = self.locks.acquire(&reg_code).await;

        let Some(state) = self.storage.load_attendance_state(&reg_code).await? else {
            warn!("Attendance refused for unknown resident {}", reg_code);
            return Ok(MarkAttendanceResult {
                reg_code,
                outcome: AttendanceOutcome::NotFound,
            });
        };

        let outcome = match decide(&state, observed) {
            AttendanceDecision::Rejected(rejection) => {
                warn!("Attendance refused for {}: {:?}", reg_code, rejection);
                AttendanceOutcome::from(rejection)
            }
            AttendanceDecision::Accepted(check_in) => {
                self.storage
                    .save_check_in(&check_in.subscription, &check_in.activity)
                    .await?;
                let last_count = check_in.activity.last_count.unwrap_or(1);
                info!(
                    "Attendance marked for {}: count={}, balance={}",
                    reg_code, last_count, check_in.subscription.remaining_balance
                );
                AttendanceOutcome::Accepted {
                    remaining_balance: check_in.subscription.remaining_balance,
                    last_count,
                }
            }
        };

        Ok(MarkAttendanceResult { reg_code, outcome })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;
    use crate::domain::models::activity::{Activity, AttendanceState};
    use crate::domain::models::subscription::{Subscription, SubscriptionStatus};
    use crate::storage::connection::DbConnection;
    use crate::storage::repositories::AttendanceRepository;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    /// In-memory storage double that records every save
    #[derive(Default)]
    struct MemoryStorage {
        states: Mutex<HashMap<String, AttendanceState>>,
        saves: Mutex<usize>,
        fail_saves: bool,
    }

    impl MemoryStorage {
        fn with_resident(plan: PlanType, balance: f64, status: SubscriptionStatus) -> Self {
            let storage = Self::default();
            storage.states.lock().unwrap().insert(
                "UG0001".to_string(),
                AttendanceState {
                    subscription: Subscription {
                        reg_code: "UG0001".to_string(),
                        number_of_days: 30,
                        renew_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                        remaining_balance: balance,
                        plan_type: plan,
                        status,
                    },
                    activity: Activity::empty("UG0001"),
                },
            );
            storage
        }

        fn state(&self) -> AttendanceState {
            self.states.lock().unwrap()["UG0001"].clone()
        }

        fn save_count(&self) -> usize {
            *self.saves.lock().unwrap()
        }
    }

    #[async_trait]
    impl AttendanceStorage for MemoryStorage {
        async fn load_attendance_state(&self, reg_code: &str) -> Result<Option<AttendanceState>> {
            let state = self.states.lock().unwrap().get(reg_code).cloned();
            // Widen the read-write window so unserialized callers would interleave
            tokio::time::sleep(Duration::from_millis(5)).await;
            Ok(state)
        }

        async fn save_check_in(&self, subscription: &Subscription, activity: &Activity) -> Result<()> {
            if self.fail_saves {
                return Err(anyhow!("disk full"));
            }
            *self.saves.lock().unwrap() += 1;
            self.states.lock().unwrap().insert(
                subscription.reg_code.clone(),
                AttendanceState {
                    subscription: subscription.clone(),
                    activity: activity.clone(),
                },
            );
            Ok(())
        }
    }

    fn command(reg_code: &str, observed_at: &str) -> MarkAttendanceCommand {
        MarkAttendanceCommand {
            reg_code: reg_code.to_string(),
            observed_at: observed_at.to_string(),
        }
    }

    #[tokio::test]
    async fn test_single_plan_scenario() {
        let storage = Arc::new(MemoryStorage::with_resident(PlanType::Single, 5.0, SubscriptionStatus::Active));
        let service = AttendanceService::new(storage.clone(), Arc::new(ResidentLocks::new()));

        let result = service.mark_attendance(command("ug0001", "2024-01-10T08:00:00")).await.unwrap();
        assert_eq!(result.reg_code, "UG0001");
        assert_eq!(
            result.outcome,
            AttendanceOutcome::Accepted {
                remaining_balance: 4.0,
                last_count: 1
            }
        );
        let state = storage.state();
        assert_eq!(state.activity.last_active_date, NaiveDate::from_ymd_opt(2024, 1, 10));

        let again = service.mark_attendance(command("UG0001", "2024-01-10T08:00:00")).await.unwrap();
        assert_eq!(
            again.outcome,
            AttendanceOutcome::QuotaExhausted {
                plan: PlanType::Single
            }
        );
        assert_eq!(storage.state().subscription.remaining_balance, 4.0);
        assert_eq!(storage.save_count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_resident_is_not_found() {
        let storage = Arc::new(MemoryStorage::default());
        let service = AttendanceService::new(storage.clone(), Arc::new(ResidentLocks::new()));

        let result = service.mark_attendance(command("UG0404", "2024-01-10T08:00:00")).await.unwrap();
        assert_eq!(result.outcome, AttendanceOutcome::NotFound);
        assert!(!result.outcome.is_success());
        assert_eq!(storage.save_count(), 0);
    }

    #[tokio::test]
    async fn test_rejections_do_not_save() {
        let expired = Arc::new(MemoryStorage::with_resident(PlanType::Both, 0.0, SubscriptionStatus::Active));
        let service = AttendanceService::new(expired.clone(), Arc::new(ResidentLocks::new()));
        let result = service.mark_attendance(command("UG0001", "2024-01-10T13:00:00")).await.unwrap();
        assert_eq!(result.outcome, AttendanceOutcome::Expired);
        assert_eq!(expired.save_count(), 0);

        let inactive = Arc::new(MemoryStorage::with_resident(PlanType::Both, 3.0, SubscriptionStatus::Inactive));
        let service = AttendanceService::new(inactive.clone(), Arc::new(ResidentLocks::new()));
        let result = service.mark_attendance(command("UG0001", "2024-01-10T13:00:00")).await.unwrap();
        assert_eq!(result.outcome, AttendanceOutcome::Inactive);
        assert_eq!(inactive.save_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_timestamp_is_validation_error() {
        let storage = Arc::new(MemoryStorage::with_resident(PlanType::Single, 5.0, SubscriptionStatus::Active));
        let service = AttendanceService::new(storage, Arc::new(ResidentLocks::new()));

        let err = service.mark_attendance(command("UG0001", "yesterday")).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<DomainError>(), Some(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_save_failure_is_error() {
        let storage = Arc::new(MemoryStorage {
            fail_saves: true,
            ..MemoryStorage::with_resident(PlanType::Single, 5.0, SubscriptionStatus::Active)
        });
        let service = AttendanceService::new(storage.clone(), Arc::new(ResidentLocks::new()));

        assert!(service.mark_attendance(command("UG0001", "2024-01-10T08:00:00")).await.is_err());
        assert_eq!(storage.state().subscription.remaining_balance, 5.0);
    }

    #[tokio::test]
    async fn test_concurrent_check_ins_accept_exactly_one() {
        let storage = Arc::new(MemoryStorage::with_resident(PlanType::Single, 5.0, SubscriptionStatus::Active));
        let service = AttendanceService::new(storage.clone(), Arc::new(ResidentLocks::new()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.mark_attendance(command("UG0001", "2024-01-10T08:00:00")).await })
            })
            .collect();

        let mut accepted = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap().outcome.is_success() {
                accepted += 1;
            }
        }
        assert_eq!(accepted, 1);
        assert_eq!(storage.state().subscription.remaining_balance, 4.0);
        assert_eq!(storage.save_count(), 1);
    }

    #[tokio::test]
    async fn test_both_plan_day_against_sqlite() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        sqlx::query(
            "INSERT INTO customers (reg_code, first_name, last_name, guardian_first_name, guardian_last_name, joining_date)
             VALUES ('UG0002', 'Vikram', 'Das', 'Anil', 'Das', '2024-01-01')",
        )
        .execute(db.pool())
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO subscriptions (reg_code, number_of_days, renew_date, remaining_balance, plan_type, status)
             VALUES ('UG0002', 30, '2024-01-01', 30.0, 'both', 'active')",
        )
        .execute(db.pool())
        .await
        .unwrap();
        sqlx::query("INSERT INTO activities (reg_code) VALUES ('UG0002')")
            .execute(db.pool())
            .await
            .unwrap();
        let storage = Arc::new(AttendanceRepository::new(db));
        let service = AttendanceService::new(storage, Arc::new(ResidentLocks::new()));

        let lunch = service.mark_attendance(command("UG0002", "2024-01-10T12:30:00")).await.unwrap();
        assert!(lunch.outcome.is_success());

        let second_lunch = service.mark_attendance(command("UG0002", "2024-01-10T13:00:00")).await.unwrap();
        assert_eq!(
            second_lunch.outcome,
            AttendanceOutcome::SlotAlreadyMarked { slot: MealSlot::Lunch }
        );

        let dinner = service.mark_attendance(command("UG0002", "2024-01-10T19:00:00+05:30")).await.unwrap();
        assert_eq!(
            dinner.outcome,
            AttendanceOutcome::Accepted {
                remaining_balance: 29.0,
                last_count: 2
            }
        );

        let third = service.mark_attendance(command("UG0002", "2024-01-10T21:00:00")).await.unwrap();
        assert_eq!(third.outcome, AttendanceOutcome::QuotaExhausted { plan: PlanType::Both });

        let next_day = service.mark_attendance(command("UG0002", "2024-01-11T09:00:00")).await.unwrap();
        assert_eq!(
            next_day.outcome,
            AttendanceOutcome::Accepted {
                remaining_balance: 28.5,
                last_count: 1
            }
        );
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(
            AttendanceOutcome::SlotAlreadyMarked { slot: MealSlot::Dinner }.message("UG0001"),
            "Attendance already marked for Dinner time for UG0001"
        );
        assert!(AttendanceOutcome::Expired.message("UG0001").contains("renew"));
    }
}
