//! Report data for the printable new-resident and pending-payment sheets.
//!
//! Rows are numbered from 1 in display order.

use anyhow::{Context, Result};
use chrono::Days;
use tracing::info;

use super::commands::report::{
    NewResidentLine, NewResidentReportQuery, NewResidentReportResult, PendingPaymentEntry, PendingPaymentLine,
    PendingPaymentsReportResult,
};
use super::models::payment::Payment;
use super::validation::{parse_date, require_date_range};
use crate::storage::repositories::{PaymentRepository, ResidentRepository};

#[derive(Clone)]
pub struct ReportService {
    residents: ResidentRepository,
    payments: PaymentRepository,
}

impl ReportService {
    pub fn new(residents: ResidentRepository, payments: PaymentRepository) -> Self {
        Self { residents, payments }
    }

    /// Residents whose plan started or was renewed within the inclusive range,
    /// with the figures of their latest payment
    pub async fn new_residents_report(&self, query: NewResidentReportQuery) -> Result<NewResidentReportResult> {
        let start_date = parse_date("start_date", &query.start_date)?;
        let end_date = parse_date("end_date", &query.end_date)?;
        require_date_range(start_date, end_date)?;
        info!("Building new resident report for {}..={}", start_date, end_date);

        let profiles = self.residents.list_profiles_renewed_between(start_date, end_date).await?;
        let mut lines = Vec::with_capacity(profiles.len());

        for (index, profile) in profiles.into_iter().enumerate() {
            let subscription = &profile.subscription;
            let latest = self.payments.latest_for_resident(&profile.resident.reg_code).await?;
            let end = subscription
                .renew_date
                .checked_add_days(Days::new(u64::from(subscription.number_of_days)))
                .with_context(|| format!("End date out of range for {}", profile.resident.reg_code))?;

            lines.push(NewResidentLine {
                serial_number: index as u32 + 1,
                reg_code: profile.resident.reg_code.clone(),
                name: profile.resident.full_name(),
                duration_days: subscription.number_of_days,
                meal_plan: subscription.plan_type.meal_label().to_string(),
                payment_advance: latest.as_ref().map_or(0.0, |p| p.paid_amount),
                payment_pending: latest.as_ref().map_or(0.0, Payment::pending_amount),
                end_date: end,
                pay_mode: latest.as_ref().map(Payment::pay_mode_summary).unwrap_or_default(),
            });
        }

        info!("New resident report has {} rows", lines.len());
        Ok(NewResidentReportResult {
            start_date,
            end_date,
            lines,
        })
    }

    /// Residents with at least one pending payment, grouped per resident
    pub async fn pending_payments_report(&self) -> Result<PendingPaymentsReportResult> {
        info!("Building pending payments report");

        // Ordered by reg_code, so each resident's payments are contiguous
        let pending = self.payments.list_pending().await?;
        let mut lines: Vec<PendingPaymentLine> = Vec::new();

        for payment in pending {
            let entry = PendingPaymentEntry {
                payment_date: payment.payment_date,
                total: payment.total_amount,
                paid: payment.paid_amount,
                pending: payment.pending_amount(),
            };

            if let Some(line) = lines.last_mut().filter(|line| line.reg_code == payment.reg_code) {
                line.payments.push(entry);
                continue;
            }

            let profile = self
                .residents
                .get_profile(&payment.reg_code)
                .await?
                .with_context(|| format!("Pending payment {} has no resident", payment.id))?;
            lines.push(PendingPaymentLine {
                serial_number: lines.len() as u32 + 1,
                reg_code: payment.reg_code,
                name: profile.resident.full_name(),
                payments: vec![entry],
                phone: profile.contact.phone,
                guardian_phone: profile.contact.guardian_phone,
            });
        }

        info!("Pending payments report has {} residents", lines.len());
        Ok(PendingPaymentsReportResult { lines })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;
    use crate::storage::connection::DbConnection;
    use chrono::NaiveDate;

    async fn insert_resident(db: &DbConnection, code: &str, plan: &str, renew_date: &str) {
        sqlx::query(
            "INSERT INTO customers (reg_code, first_name, last_name, guardian_first_name, guardian_last_name, joining_date)
             VALUES (?, 'Asha', 'Rao', 'Ravi', 'Rao', ?)",
        )
        .bind(code)
        .bind(renew_date)
        .execute(db.pool())
        .await
        .unwrap();
        sqlx::query("INSERT INTO contacts (reg_code, phone, guardian_phone) VALUES (?, '9876543210', '9876500000')")
            .bind(code)
            .execute(db.pool())
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO subscriptions (reg_code, number_of_days, renew_date, remaining_balance, plan_type, status)
             VALUES (?, 30, ?, 30.0, ?, 'active')",
        )
        .bind(code)
        .bind(renew_date)
        .bind(plan)
        .execute(db.pool())
        .await
        .unwrap();
    }

    async fn insert_payment(db: &DbConnection, code: &str, date: &str, total: f64, paid: f64, status: &str) {
        sqlx::query(
            "INSERT INTO payments (reg_code, bill_number, payment_date, total_amount, paid_amount, status, online, cash)
             VALUES (?, (SELECT COALESCE(MAX(bill_number), 0) + 1 FROM payments), ?, ?, ?, ?, ?, 200.0)",
        )
        .bind(code)
        .bind(date)
        .bind(total)
        .bind(paid)
        .bind(status)
        .bind(paid - 200.0)
        .execute(db.pool())
        .await
        .unwrap();
    }

    async fn setup_test() -> ReportService {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        insert_resident(&db, "UG0001", "both", "2024-01-05").await;
        insert_resident(&db, "UG0002", "single", "2024-01-20").await;
        insert_resident(&db, "UG0003", "single", "2024-03-01").await;

        insert_payment(&db, "UG0001", "2023-12-05", 3000.0, 3000.0, "complete").await;
        insert_payment(&db, "UG0001", "2024-01-05", 3000.0, 2500.0, "pending").await;
        insert_payment(&db, "UG0002", "2024-01-20", 1500.0, 1000.0, "pending").await;
        insert_payment(&db, "UG0002", "2024-01-25", 100.0, 50.0, "pending").await;
        insert_payment(&db, "UG0003", "2024-03-01", 1500.0, 1500.0, "complete").await;

        ReportService::new(ResidentRepository::new(db.clone()), PaymentRepository::new(db))
    }

    #[tokio::test]
    async fn test_new_residents_report() {
        let service = setup_test().await;
        let report = service
            .new_residents_report(NewResidentReportQuery {
                start_date: "2024-01-01".to_string(),
                end_date: "2024-01-31".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(report.lines.len(), 2);
        let first = &report.lines[0];
        assert_eq!(first.serial_number, 1);
        assert_eq!(first.reg_code, "UG0001");
        assert_eq!(first.name, "Asha Rao");
        assert_eq!(first.meal_plan, "Lunch, Dinner");
        assert_eq!(first.payment_advance, 2500.0);
        assert_eq!(first.payment_pending, 500.0);
        assert_eq!(first.end_date, NaiveDate::from_ymd_opt(2024, 2, 4).unwrap());
        assert_eq!(first.pay_mode, "online(2300.00), cash(200.00)");

        let second = &report.lines[1];
        assert_eq!(second.serial_number, 2);
        assert_eq!(second.meal_plan, "Lunch");
        // Latest payment is the 2024-01-25 one
        assert_eq!(second.payment_pending, 50.0);
    }

    #[tokio::test]
    async fn test_new_residents_report_rejects_reversed_range() {
        let service = setup_test().await;
        let err = service
            .new_residents_report(NewResidentReportQuery {
                start_date: "2024-02-01".to_string(),
                end_date: "2024-01-01".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err.downcast_ref::<DomainError>(), Some(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_pending_payments_report_groups_by_resident() {
        let service = setup_test().await;
        let report = service.pending_payments_report().await.unwrap();

        assert_eq!(report.lines.len(), 2);
        assert_eq!(report.lines[0].reg_code, "UG0001");
        assert_eq!(report.lines[0].payments.len(), 1);
        assert_eq!(report.lines[0].payments[0].pending, 500.0);
        assert_eq!(report.lines[1].serial_number, 2);
        assert_eq!(report.lines[1].reg_code, "UG0002");
        assert_eq!(report.lines[1].payments.len(), 2);
        assert_eq!(report.lines[1].phone, "9876543210");
    }
}
