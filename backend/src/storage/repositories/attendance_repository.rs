use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use sqlx::Row;

use super::rows::{date_to_sql, get_optional_date, get_optional_timestamp, subscription_from_row, timestamp_to_sql};
use crate::domain::models::activity::{Activity, AttendanceState};
use crate::domain::models::subscription::Subscription;
use crate::storage::connection::DbConnection;
use crate::storage::traits::AttendanceStorage;

/// SQLite-backed storage for check-ins
#[derive(Clone)]
pub struct AttendanceRepository {
    db: DbConnection,
}

impl AttendanceRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AttendanceStorage for AttendanceRepository {
    async fn load_attendance_state(&self, reg_code: &str) -> Result<Option<AttendanceState>> {
        let row = sqlx::query(
            r#"
            SELECT s.reg_code, s.number_of_days, s.renew_date, s.remaining_balance,
                   s.plan_type, s.status,
                   a.last_active_date, a.last_count, a.last_marked_at
            FROM subscriptions s
            LEFT JOIN activities a ON a.reg_code = s.reg_code
            WHERE s.reg_code = ?
            "#,
        )
        .bind(reg_code)
        .fetch_optional(self.db.pool())
        .await
        .with_context(|| format!("Failed to load attendance state for {}", reg_code))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let subscription = subscription_from_row(&row)?;
        let last_count: Option<i64> = row.try_get("last_count")?;
        let activity = Activity {
            reg_code: subscription.reg_code.clone(),
            last_active_date: get_optional_date(&row, "last_active_date")?,
            last_count: last_count
                .map(u8::try_from)
                .transpose()
                .with_context(|| format!("Invalid last_count for {}", reg_code))?,
            last_marked_at: get_optional_timestamp(&row, "last_marked_at")?,
        };

        Ok(Some(AttendanceState { subscription, activity }))
    }

    async fn save_check_in(&self, subscription: &Subscription, activity: &Activity) -> Result<()> {
        let mut tx = self.db.pool().begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE subscriptions
            SET remaining_balance = ?, updated_at = CURRENT_TIMESTAMP
            WHERE reg_code = ?
            "#,
        )
        .bind(subscription.remaining_balance)
        .bind(&subscription.reg_code)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() != 1 {
            return Err(anyhow!("Subscription not found: {}", subscription.reg_code));
        }

        sqlx::query(
            r#"
            INSERT INTO activities (reg_code, last_active_date, last_count, last_marked_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(reg_code) DO UPDATE SET
                last_active_date = excluded.last_active_date,
                last_count = excluded.last_count,
                last_marked_at = excluded.last_marked_at
            "#,
        )
        .bind(&activity.reg_code)
        .bind(activity.last_active_date.map(date_to_sql))
        .bind(activity.last_count.map(i64::from))
        .bind(activity.last_marked_at.map(timestamp_to_sql))
        .execute(&mut *tx)
        .await?;

        tx.commit().await.context("Failed to commit check-in")?;
        Ok(())
    }
}
