use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use super::commands::subscription::{
    RenewSubscriptionCommand, RenewSubscriptionResult, UpdateStatusCommand, UpdateStatusResult,
};
use super::errors::DomainError;
use super::models::resident::Resident;
use super::models::subscription::Subscription;
use super::payment_service::new_payment_from;
use super::resident_locks::ResidentLocks;
use super::validation::parse_date;
use crate::storage::repositories::SubscriptionRepository;

/// Service for renewing and (de)activating subscriptions
#[derive(Clone)]
pub struct SubscriptionService {
    subscriptions: SubscriptionRepository,
    locks: Arc<ResidentLocks>,
}

impl SubscriptionService {
    pub fn new(subscriptions: SubscriptionRepository, locks: Arc<ResidentLocks>) -> Self {
        Self { subscriptions, locks }
    }

    pub async fn get_subscription(&self, reg_code: &str) -> Result<Subscription> {
        let reg_code = Resident::normalize_reg_code(reg_code);
        info!("Getting subscription for {}", reg_code);

        self.subscriptions.get(&reg_code).await?.ok_or_else(|| {
            warn!("Subscription not found: {}", reg_code);
            DomainError::not_found(format!("Resident {} not found", reg_code)).into()
        })
    }

    /// Renew a plan: the purchased days are added to whatever balance is left
    pub async fn renew_subscription(&self, command: RenewSubscriptionCommand) -> Result<RenewSubscriptionResult> {
        let reg_code = Resident::normalize_reg_code(&command.reg_code);
        info!(
            "Renewing subscription for {}: {} days, plan={}",
            reg_code,
            command.plan_days,
            command.plan_type.as_str()
        );

        if command.plan_days == 0 {
            return Err(DomainError::validation("plan_days: must be greater than zero").into());
        }
        let renew_date = parse_date("renew_date", &command.renew_date)?;
        let payment = new_payment_from(&command.payment)?;

        // Check-ins rewrite the balance too
        let _guard = self.locks.acquire(&reg_code).await;
        let current = self.get_subscription(&reg_code).await?;
        let subscription = Subscription {
            number_of_days: command.plan_days,
            renew_date,
            remaining_balance: current.remaining_balance + f64::from(command.plan_days),
            plan_type: command.plan_type,
            status: command.status,
            ..current
        };

        let payment = self.subscriptions.renew(&subscription, &payment).await?;
        let expected_end_date = subscription.expected_end_date();
        info!(
            "Renewed subscription for {}: balance={}, expected end {}",
            reg_code, subscription.remaining_balance, expected_end_date
        );

        Ok(RenewSubscriptionResult {
            subscription,
            payment,
            expected_end_date,
            success_message: format!("Subscription for {} renewed successfully", reg_code),
        })
    }

    pub async fn update_status(&self, command: UpdateStatusCommand) -> Result<UpdateStatusResult> {
        let reg_code = Resident::normalize_reg_code(&command.reg_code);
        info!("Setting subscription status of {} to {}", reg_code, command.status.as_str());

        if !self.subscriptions.update_status(&reg_code, command.status).await? {
            warn!("Subscription not found: {}", reg_code);
            return Err(DomainError::not_found(format!("Resident {} not found", reg_code)).into());
        }

        let subscription = self.get_subscription(&reg_code).await?;
        Ok(UpdateStatusResult {
            subscription,
            success_message: format!("Status of {} set to {}", reg_code, command.status.as_str()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::payment::PaymentDetails;
    use crate::domain::models::payment::PaymentStatus;
    use crate::domain::models::subscription::{PlanType, SubscriptionStatus};
    use crate::storage::connection::DbConnection;
    use chrono::NaiveDate;

    async fn setup_test() -> SubscriptionService {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        sqlx::query(
            "INSERT INTO customers (reg_code, first_name, last_name, guardian_first_name, guardian_last_name, joining_date)
             VALUES ('UG0001', 'Asha', 'Rao', 'Ravi', 'Rao', '2024-01-01')",
        )
        .execute(db.pool())
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO subscriptions (reg_code, number_of_days, renew_date, remaining_balance, plan_type, status)
             VALUES ('UG0001', 30, '2024-01-01', 2.5, 'both', 'inactive')",
        )
        .execute(db.pool())
        .await
        .unwrap();
        SubscriptionService::new(SubscriptionRepository::new(db), Arc::new(ResidentLocks::new()))
    }

    fn renew_command(reg_code: &str, plan_days: u32) -> RenewSubscriptionCommand {
        RenewSubscriptionCommand {
            reg_code: reg_code.to_string(),
            plan_days,
            plan_type: PlanType::Single,
            status: SubscriptionStatus::Active,
            renew_date: "2024-02-01".to_string(),
            payment: PaymentDetails {
                bill_number: Some(17),
                payment_date: "2024-02-01".to_string(),
                total_amount: 3000.0,
                paid_amount: 2000.0,
                online: Some(2000.0),
                cash: None,
                txn_id: Some("TXN7".to_string()),
            },
        }
    }

    #[tokio::test]
    async fn test_renew_adds_days_to_balance() {
        let service = setup_test().await;
        let result = service.renew_subscription(renew_command("ug0001", 30)).await.unwrap();

        assert_eq!(result.subscription.remaining_balance, 32.5);
        assert_eq!(result.subscription.number_of_days, 30);
        assert_eq!(result.subscription.plan_type, PlanType::Single);
        assert_eq!(result.subscription.status, SubscriptionStatus::Active);
        // 2024-02-01 + 32 whole days
        assert_eq!(result.expected_end_date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(result.payment.bill_number, 17);
        assert_eq!(result.payment.status, PaymentStatus::Pending);
        assert_eq!(service.get_subscription("UG0001").await.unwrap(), result.subscription);
    }

    #[tokio::test]
    async fn test_overlapping_renewals_all_add_days() {
        let service = setup_test().await;

        let handles: Vec<_> = (0..5)
            .map(|_| {
                let service = service.clone();
                let mut command = renew_command("UG0001", 2);
                command.payment.bill_number = None;
                tokio::spawn(async move { service.renew_subscription(command).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(service.get_subscription("UG0001").await.unwrap().remaining_balance, 12.5);
    }

    #[tokio::test]
    async fn test_renew_validation_and_not_found() {
        let service = setup_test().await;

        let err = service.renew_subscription(renew_command("UG0001", 0)).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<DomainError>(), Some(DomainError::Validation(_))));

        let err = service.renew_subscription(renew_command("UG0404", 30)).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<DomainError>(), Some(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_status() {
        let service = setup_test().await;
        let result = service
            .update_status(UpdateStatusCommand {
                reg_code: "UG0001".to_string(),
                status: SubscriptionStatus::Active,
            })
            .await
            .unwrap();
        assert_eq!(result.subscription.status, SubscriptionStatus::Active);

        let err = service
            .update_status(UpdateStatusCommand {
                reg_code: "UG0404".to_string(),
                status: SubscriptionStatus::Active,
            })
            .await
            .unwrap_err();
        assert!(matches!(err.downcast_ref::<DomainError>(), Some(DomainError::NotFound(_))));
    }
}
