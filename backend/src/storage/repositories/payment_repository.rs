use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::SqliteConnection;

use super::rows::{date_to_sql, payment_from_row};
use crate::domain::models::payment::{NewPayment, Payment};
use crate::storage::connection::DbConnection;

const PAYMENT_COLUMNS: &str = "id, reg_code, bill_number, payment_date, total_amount, paid_amount, status, online, cash, txn_id";

/// Insert a payment on an open connection or transaction.
///
/// Assigns the next free bill number when the payment carries none.
pub async fn insert_payment(conn: &mut SqliteConnection, reg_code: &str, payment: &NewPayment) -> Result<Payment> {
    let bill_number = match payment.bill_number {
        Some(number) => number,
        None => {
            sqlx::query_scalar::<_, i64>("SELECT COALESCE(MAX(bill_number), 0) + 1 FROM payments")
                .fetch_one(&mut *conn)
                .await?
        }
    };

    let result = sqlx::query(
        r#"
        INSERT INTO payments (reg_code, bill_number, payment_date, total_amount, paid_amount, status, online, cash, txn_id)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(reg_code)
    .bind(bill_number)
    .bind(date_to_sql(payment.payment_date))
    .bind(payment.total_amount)
    .bind(payment.paid_amount)
    .bind(payment.status.as_str())
    .bind(payment.online)
    .bind(payment.cash)
    .bind(&payment.txn_id)
    .execute(&mut *conn)
    .await
    .with_context(|| format!("Failed to store payment for {}", reg_code))?;

    Ok(Payment {
        id: result.last_insert_rowid(),
        reg_code: reg_code.to_string(),
        bill_number,
        payment_date: payment.payment_date,
        total_amount: payment.total_amount,
        paid_amount: payment.paid_amount,
        status: payment.status,
        online: payment.online,
        cash: payment.cash,
        txn_id: payment.txn_id.clone(),
    })
}

/// Repository for payment operations
#[derive(Clone)]
pub struct PaymentRepository {
    db: DbConnection,
}

impl PaymentRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Payments of one resident, newest first
    pub async fn list_for_resident(&self, reg_code: &str) -> Result<Vec<Payment>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM payments WHERE reg_code = ? ORDER BY payment_date DESC, id DESC",
            PAYMENT_COLUMNS
        ))
        .bind(reg_code)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(payment_from_row).collect()
    }

    pub async fn get_for_resident(&self, reg_code: &str, payment_id: i64) -> Result<Option<Payment>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM payments WHERE reg_code = ? AND id = ?",
            PAYMENT_COLUMNS
        ))
        .bind(reg_code)
        .bind(payment_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(payment_from_row).transpose()
    }

    /// Most recently recorded payment of a resident
    pub async fn latest_for_resident(&self, reg_code: &str) -> Result<Option<Payment>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM payments WHERE reg_code = ? ORDER BY id DESC LIMIT 1",
            PAYMENT_COLUMNS
        ))
        .bind(reg_code)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(payment_from_row).transpose()
    }

    pub async fn update(&self, payment: &Payment) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE payments
            SET payment_date = ?, total_amount = ?, paid_amount = ?, status = ?,
                online = ?, cash = ?, txn_id = ?
            WHERE id = ? AND reg_code = ?
            "#,
        )
        .bind(date_to_sql(payment.payment_date))
        .bind(payment.total_amount)
        .bind(payment.paid_amount)
        .bind(payment.status.as_str())
        .bind(payment.online)
        .bind(payment.cash)
        .bind(&payment.txn_id)
        .bind(payment.id)
        .bind(&payment.reg_code)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// Payments dated within [start, end], oldest first
    pub async fn list_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Payment>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM payments WHERE payment_date BETWEEN ? AND ? ORDER BY payment_date ASC, id ASC",
            PAYMENT_COLUMNS
        ))
        .bind(date_to_sql(start))
        .bind(date_to_sql(end))
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(payment_from_row).collect()
    }

    /// Move every payment dated within [start, end] to `new_date`
    pub async fn bulk_update_date(&self, start: NaiveDate, end: NaiveDate, new_date: NaiveDate) -> Result<u64> {
        let result = sqlx::query("UPDATE payments SET payment_date = ? WHERE payment_date BETWEEN ? AND ?")
            .bind(date_to_sql(new_date))
            .bind(date_to_sql(start))
            .bind(date_to_sql(end))
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected())
    }

    /// All pending payments, grouped by resident order then date
    pub async fn list_pending(&self) -> Result<Vec<Payment>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM payments WHERE status = 'pending' ORDER BY reg_code ASC, payment_date ASC, id ASC",
            PAYMENT_COLUMNS
        ))
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(payment_from_row).collect()
    }
}
