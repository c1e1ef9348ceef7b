use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::payment_repository::insert_payment;
use super::rows::{date_to_sql, get_date, subscription_from_row};
use crate::domain::models::payment::{NewPayment, Payment};
use crate::domain::models::resident::{Contact, Resident, ResidentProfile, ResidentSummary};
use crate::domain::models::subscription::Subscription;
use crate::storage::connection::DbConnection;

const PROFILE_QUERY: &str = r#"
    SELECT c.reg_code, c.first_name, c.last_name, c.guardian_first_name, c.guardian_last_name, c.joining_date,
           ct.address, ct.email, ct.phone, ct.guardian_phone,
           s.number_of_days, s.renew_date, s.remaining_balance, s.plan_type, s.status
    FROM customers c
    JOIN contacts ct ON ct.reg_code = c.reg_code
    JOIN subscriptions s ON s.reg_code = c.reg_code
"#;

/// Repository for residents and the rows they own one-to-one
#[derive(Clone)]
pub struct ResidentRepository {
    db: DbConnection,
}

impl ResidentRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store a new resident with contact, subscription, empty activity and first payment.
    ///
    /// All rows are written in one transaction.
    pub async fn create(
        &self,
        resident: &Resident,
        contact: &Contact,
        subscription: &Subscription,
        payment: &NewPayment,
    ) -> Result<Payment> {
        let mut tx = self.db.pool().begin().await?;

        sqlx::query(
            r#"
            INSERT INTO customers (reg_code, first_name, last_name, guardian_first_name, guardian_last_name, joining_date)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&resident.reg_code)
        .bind(&resident.first_name)
        .bind(&resident.last_name)
        .bind(&resident.guardian_first_name)
        .bind(&resident.guardian_last_name)
        .bind(date_to_sql(resident.joining_date))
        .execute(&mut *tx)
        .await
        .with_context(|| format!("Failed to store resident {}", resident.reg_code))?;

        sqlx::query(
            r#"
            INSERT INTO contacts (reg_code, address, email, phone, guardian_phone)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&contact.reg_code)
        .bind(&contact.address)
        .bind(&contact.email)
        .bind(&contact.phone)
        .bind(&contact.guardian_phone)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO subscriptions (reg_code, number_of_days, renew_date, remaining_balance, plan_type, status)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&subscription.reg_code)
        .bind(i64::from(subscription.number_of_days))
        .bind(date_to_sql(subscription.renew_date))
        .bind(subscription.remaining_balance)
        .bind(subscription.plan_type.as_str())
        .bind(subscription.status.as_str())
        .execute(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO activities (reg_code) VALUES (?)")
            .bind(&resident.reg_code)
            .execute(&mut *tx)
            .await?;

        let payment = insert_payment(&mut *tx, &resident.reg_code, payment).await?;

        tx.commit().await.context("Failed to commit new resident")?;
        Ok(payment)
    }

    pub async fn exists(&self, reg_code: &str) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM customers WHERE reg_code = ?")
            .bind(reg_code)
            .fetch_optional(self.db.pool())
            .await?;
        Ok(row.is_some())
    }

    pub async fn get_profile(&self, reg_code: &str) -> Result<Option<ResidentProfile>> {
        let row = sqlx::query(&format!("{} WHERE c.reg_code = ?", PROFILE_QUERY))
            .bind(reg_code)
            .fetch_optional(self.db.pool())
            .await
            .with_context(|| format!("Failed to load resident {}", reg_code))?;

        row.as_ref().map(profile_from_row).transpose()
    }

    /// Residents whose subscription was started or renewed within [start, end]
    pub async fn list_profiles_renewed_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<ResidentProfile>> {
        let rows = sqlx::query(&format!(
            "{} WHERE s.renew_date BETWEEN ? AND ? ORDER BY s.renew_date ASC, c.reg_code ASC",
            PROFILE_QUERY
        ))
        .bind(date_to_sql(start))
        .bind(date_to_sql(end))
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(profile_from_row).collect()
    }

    /// Summary rows for the resident table, ordered by registration code
    pub async fn list_summaries(&self) -> Result<Vec<ResidentSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT c.reg_code, c.first_name, c.last_name, s.remaining_balance, s.renew_date
            FROM customers c
            JOIN subscriptions s ON s.reg_code = c.reg_code
            ORDER BY c.reg_code ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter()
            .map(|row| {
                Ok(ResidentSummary {
                    reg_code: row.try_get("reg_code")?,
                    first_name: row.try_get("first_name")?,
                    last_name: row.try_get("last_name")?,
                    remaining_balance: row.try_get("remaining_balance")?,
                    renew_date: get_date(row, "renew_date")?,
                })
            })
            .collect()
    }

    /// Replace profile, contact and subscription rows of an existing resident
    pub async fn update_profile(&self, profile: &ResidentProfile) -> Result<()> {
        let mut tx = self.db.pool().begin().await?;
        let resident = &profile.resident;
        let contact = &profile.contact;
        let subscription = &profile.subscription;

        sqlx::query(
            r#"
            UPDATE customers
            SET first_name = ?, last_name = ?, guardian_first_name = ?, guardian_last_name = ?, joining_date = ?
            WHERE reg_code = ?
            "#,
        )
        .bind(&resident.first_name)
        .bind(&resident.last_name)
        .bind(&resident.guardian_first_name)
        .bind(&resident.guardian_last_name)
        .bind(date_to_sql(resident.joining_date))
        .bind(&resident.reg_code)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE contacts
            SET address = ?, email = ?, phone = ?, guardian_phone = ?
            WHERE reg_code = ?
            "#,
        )
        .bind(&contact.address)
        .bind(&contact.email)
        .bind(&contact.phone)
        .bind(&contact.guardian_phone)
        .bind(&contact.reg_code)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE subscriptions
            SET number_of_days = ?, renew_date = ?, remaining_balance = ?, plan_type = ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE reg_code = ?
            "#,
        )
        .bind(i64::from(subscription.number_of_days))
        .bind(date_to_sql(subscription.renew_date))
        .bind(subscription.remaining_balance)
        .bind(subscription.plan_type.as_str())
        .bind(&subscription.reg_code)
        .execute(&mut *tx)
        .await?;

        tx.commit().await.context("Failed to commit resident update")?;
        Ok(())
    }
}

fn profile_from_row(row: &SqliteRow) -> Result<ResidentProfile> {
    let reg_code: String = row.try_get("reg_code")?;
    Ok(ResidentProfile {
        resident: Resident {
            reg_code: reg_code.clone(),
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            guardian_first_name: row.try_get("guardian_first_name")?,
            guardian_last_name: row.try_get("guardian_last_name")?,
            joining_date: get_date(row, "joining_date")?,
        },
        contact: Contact {
            reg_code,
            address: row.try_get("address")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            guardian_phone: row.try_get("guardian_phone")?,
        },
        subscription: subscription_from_row(row)?,
    })
}
