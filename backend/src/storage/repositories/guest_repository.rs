use anyhow::{Context, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::rows::{date_to_sql, get_date, get_enum};
use crate::domain::models::guest::Guest;
use crate::storage::connection::DbConnection;

/// Repository for walk-in guest bills
#[derive(Clone)]
pub struct GuestRepository {
    db: DbConnection,
}

impl GuestRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store a guest bill; the id on the input is ignored and assigned here
    pub async fn insert(&self, guest: &Guest) -> Result<Guest> {
        let result = sqlx::query("INSERT INTO guests (name, pay_mode, pay_amount, pay_date) VALUES (?, ?, ?, ?)")
            .bind(&guest.name)
            .bind(guest.pay_mode.as_str())
            .bind(guest.pay_amount)
            .bind(date_to_sql(guest.pay_date))
            .execute(self.db.pool())
            .await
            .context("Failed to store guest")?;

        Ok(Guest {
            id: result.last_insert_rowid(),
            ..guest.clone()
        })
    }

    /// Guests newest first
    pub async fn list(&self) -> Result<Vec<Guest>> {
        let rows = sqlx::query("SELECT id, name, pay_mode, pay_amount, pay_date FROM guests ORDER BY pay_date DESC, id DESC")
            .fetch_all(self.db.pool())
            .await?;
        rows.iter().map(guest_from_row).collect()
    }

    /// Returns false when no guest has the id
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM guests WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn guest_from_row(row: &SqliteRow) -> Result<Guest> {
    Ok(Guest {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        pay_mode: get_enum(row, "pay_mode")?,
        pay_amount: row.try_get("pay_amount")?,
        pay_date: get_date(row, "pay_date")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::guest::PayMode;
    use chrono::NaiveDate;

    fn guest(name: &str, day: u32) -> Guest {
        Guest {
            id: 0,
            name: name.to_string(),
            pay_mode: PayMode::Cash,
            pay_amount: 80.0,
            pay_date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_insert_list_delete() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let repo = GuestRepository::new(db);

        let first = repo.insert(&guest("Kiran", 1)).await.unwrap();
        let second = repo.insert(&guest("Lata", 2)).await.unwrap();
        assert_ne!(first.id, second.id);

        let listed = repo.list().await.unwrap();
        assert_eq!(listed, vec![second.clone(), first.clone()]);

        assert!(repo.delete(first.id).await.unwrap());
        assert!(!repo.delete(first.id).await.unwrap());
        assert_eq!(repo.list().await.unwrap(), vec![second]);
    }
}
