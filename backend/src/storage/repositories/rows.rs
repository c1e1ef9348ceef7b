//! Row decoding shared by the SQLite repositories.
//!
//! Dates are stored as `YYYY-MM-DD` text and enums by their lowercase name.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::payment::Payment;
use crate::domain::models::subscription::Subscription;
use crate::domain::validation::DATE_FORMAT;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub fn date_to_sql(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn timestamp_to_sql(instant: NaiveDateTime) -> String {
    instant.format(TIMESTAMP_FORMAT).to_string()
}

pub fn get_date(row: &SqliteRow, column: &str) -> Result<NaiveDate> {
    let raw: String = row.try_get(column)?;
    NaiveDate::parse_from_str(&raw, DATE_FORMAT)
        .with_context(|| format!("Column {} holds invalid date '{}'", column, raw))
}

pub fn get_optional_date(row: &SqliteRow, column: &str) -> Result<Option<NaiveDate>> {
    let raw: Option<String> = row.try_get(column)?;
    raw.map(|value| {
        NaiveDate::parse_from_str(&value, DATE_FORMAT)
            .with_context(|| format!("Column {} holds invalid date '{}'", column, value))
    })
    .transpose()
}

pub fn get_optional_timestamp(row: &SqliteRow, column: &str) -> Result<Option<NaiveDateTime>> {
    let raw: Option<String> = row.try_get(column)?;
    raw.map(|value| {
        NaiveDateTime::parse_from_str(&value, TIMESTAMP_FORMAT)
            .with_context(|| format!("Column {} holds invalid timestamp '{}'", column, value))
    })
    .transpose()
}

/// Parse a text column into one of the domain enums
pub fn get_enum<T>(row: &SqliteRow, column: &str) -> Result<T>
where
    T: std::str::FromStr<Err = anyhow::Error>,
{
    let raw: String = row.try_get(column)?;
    raw.parse::<T>()
        .with_context(|| format!("Column {} holds invalid value", column))
}

pub fn get_u32(row: &SqliteRow, column: &str) -> Result<u32> {
    let raw: i64 = row.try_get(column)?;
    u32::try_from(raw).with_context(|| format!("Column {} out of range: {}", column, raw))
}

/// Decode the subscription columns of a row; expects them unprefixed
pub fn subscription_from_row(row: &SqliteRow) -> Result<Subscription> {
    Ok(Subscription {
        reg_code: row.try_get("reg_code")?,
        number_of_days: get_u32(row, "number_of_days")?,
        renew_date: get_date(row, "renew_date")?,
        remaining_balance: row.try_get("remaining_balance")?,
        plan_type: get_enum(row, "plan_type")?,
        status: get_enum(row, "status")?,
    })
}

pub fn payment_from_row(row: &SqliteRow) -> Result<Payment> {
    Ok(Payment {
        id: row.try_get("id")?,
        reg_code: row.try_get("reg_code")?,
        bill_number: row.try_get("bill_number")?,
        payment_date: get_date(row, "payment_date")?,
        total_amount: row.try_get("total_amount")?,
        paid_amount: row.try_get("paid_amount")?,
        status: get_enum(row, "status")?,
        online: row.try_get("online")?,
        cash: row.try_get("cash")?,
        txn_id: row.try_get("txn_id")?,
    })
}
