use anyhow::{anyhow, Context, Result};

use super::payment_repository::insert_payment;
use super::rows::{date_to_sql, subscription_from_row};
use crate::domain::models::payment::{NewPayment, Payment};
use crate::domain::models::subscription::{Subscription, SubscriptionStatus};
use crate::storage::connection::DbConnection;

/// Repository for subscription lifecycle operations
#[derive(Clone)]
pub struct SubscriptionRepository {
    db: DbConnection,
}

impl SubscriptionRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, reg_code: &str) -> Result<Option<Subscription>> {
        let row = sqlx::query(
            r#"
            SELECT reg_code, number_of_days, renew_date, remaining_balance, plan_type, status
            FROM subscriptions
            WHERE reg_code = ?
            "#,
        )
        .bind(reg_code)
        .fetch_optional(self.db.pool())
        .await
        .with_context(|| format!("Failed to load subscription for {}", reg_code))?;

        row.as_ref().map(subscription_from_row).transpose()
    }

    /// Store a renewed subscription together with the payment that bought it
    pub async fn renew(&self, subscription: &Subscription, payment: &NewPayment) -> Result<Payment> {
        let mut tx = self.db.pool().begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE subscriptions
            SET number_of_days = ?, renew_date = ?, remaining_balance = ?, plan_type = ?, status = ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE reg_code = ?
            "#,
        )
        .bind(i64::from(subscription.number_of_days))
        .bind(date_to_sql(subscription.renew_date))
        .bind(subscription.remaining_balance)
        .bind(subscription.plan_type.as_str())
        .bind(subscription.status.as_str())
        .bind(&subscription.reg_code)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() != 1 {
            return Err(anyhow!("Subscription not found: {}", subscription.reg_code));
        }

        let payment = insert_payment(&mut *tx, &subscription.reg_code, payment).await?;
        tx.commit().await.context("Failed to commit renewal")?;
        Ok(payment)
    }

    /// Returns false when no subscription exists for the code
    pub async fn update_status(&self, reg_code: &str, status: SubscriptionStatus) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE subscriptions SET status = ?, updated_at = CURRENT_TIMESTAMP WHERE reg_code = ?",
        )
        .bind(status.as_str())
        .bind(reg_code)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::payment::PaymentStatus;
    use crate::domain::models::subscription::PlanType;
    use chrono::NaiveDate;

    async fn setup_test() -> SubscriptionRepository {
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
             VALUES ('UG0001', 30, '2024-01-01', 2.5, 'both', 'active')",
        )
        .execute(db.pool())
        .await
        .unwrap();
        SubscriptionRepository::new(db)
    }

    fn payment(total: f64, paid: f64) -> NewPayment {
        NewPayment {
            bill_number: None,
            payment_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            total_amount: total,
            paid_amount: paid,
            status: PaymentStatus::from_amounts(total, paid),
            online: None,
            cash: Some(paid),
            txn_id: None,
        }
    }

    #[tokio::test]
    async fn test_get_subscription() {
        let repo = setup_test().await;
        let sub = repo.get("UG0001").await.unwrap().expect("subscription");
        assert_eq!(sub.plan_type, PlanType::Both);
        assert_eq!(sub.remaining_balance, 2.5);
        assert!(repo.get("UG0404").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_renew_updates_subscription_and_records_payment() {
        let repo = setup_test().await;
        let mut sub = repo.get("UG0001").await.unwrap().unwrap();
        sub.number_of_days = 30;
        sub.remaining_balance += 30.0;
        sub.renew_date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        sub.plan_type = PlanType::Single;

        let stored = repo.renew(&sub, &payment(3000.0, 3000.0)).await.unwrap();
        assert_eq!(stored.bill_number, 1);
        assert_eq!(stored.status, PaymentStatus::Complete);
        assert_eq!(repo.get("UG0001").await.unwrap().unwrap(), sub);
    }

    #[tokio::test]
    async fn test_renew_missing_subscription_records_nothing() {
        let repo = setup_test().await;
        let mut sub = repo.get("UG0001").await.unwrap().unwrap();
        sub.reg_code = "UG0404".to_string();

        assert!(repo.renew(&sub, &payment(100.0, 50.0)).await.is_err());
        let payments: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM payments")
            .fetch_one(repo.db.pool())
            .await
            .unwrap();
        assert_eq!(payments, 0);
    }

    #[tokio::test]
    async fn test_update_status() {
        let repo = setup_test().await;
        assert!(repo.update_status("UG0001", SubscriptionStatus::Inactive).await.unwrap());
        assert_eq!(repo.get("UG0001").await.unwrap().unwrap().status, SubscriptionStatus::Inactive);
        assert!(!repo.update_status("UG0404", SubscriptionStatus::Active).await.unwrap());
    }
}
