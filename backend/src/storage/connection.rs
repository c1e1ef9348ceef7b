use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

/// DbConnection manages the SQLite pool shared by all repositories
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Open (creating if missing) the database at `url` and set up the schema
    pub async fn new(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("Invalid database URL: {}", url))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open database {}", url))?;

        Self::setup_schema(&pool).await?;
        info!("Database ready at {}", url);

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize a private in-memory database for tests.
    ///
    /// A single connection keeps the in-memory database alive and
    /// serializes writes.
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Self::setup_schema(&pool).await?;
        Ok(Self { pool: Arc::new(pool) })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS customers (
                reg_code TEXT PRIMARY KEY,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                guardian_first_name TEXT NOT NULL,
                guardian_last_name TEXT NOT NULL,
                joining_date TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS contacts (
                reg_code TEXT PRIMARY KEY,
                address TEXT,
                email TEXT,
                phone TEXT NOT NULL,
                guardian_phone TEXT NOT NULL,
                FOREIGN KEY (reg_code) REFERENCES customers (reg_code) ON DELETE CASCADE
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS subscriptions (
                reg_code TEXT PRIMARY KEY,
                number_of_days INTEGER NOT NULL,
                renew_date TEXT NOT NULL,
                remaining_balance REAL NOT NULL,
                plan_type TEXT NOT NULL CHECK (plan_type IN ('single', 'both')),
                status TEXT NOT NULL CHECK (status IN ('active', 'inactive')),
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (reg_code) REFERENCES customers (reg_code) ON DELETE CASCADE
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS activities (
                reg_code TEXT PRIMARY KEY,
                last_active_date TEXT,
                last_count INTEGER,
                last_marked_at TEXT,
                FOREIGN KEY (reg_code) REFERENCES customers (reg_code) ON DELETE CASCADE
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS payments (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                reg_code TEXT NOT NULL,
                bill_number INTEGER NOT NULL,
                payment_date TEXT NOT NULL,
                total_amount REAL NOT NULL,
                paid_amount REAL NOT NULL,
                status TEXT NOT NULL CHECK (status IN ('complete', 'pending')),
                online REAL,
                cash REAL,
                txn_id TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (reg_code) REFERENCES customers (reg_code) ON DELETE CASCADE
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_payments_payment_date
            ON payments(payment_date);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS guests (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                pay_mode TEXT NOT NULL CHECK (pay_mode IN ('online', 'cash')),
                pay_amount REAL NOT NULL,
                pay_date TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}
