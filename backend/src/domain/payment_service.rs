use anyhow::Result;
use tracing::{info, warn};

use super::commands::payment::{
    BulkPaymentDateCommand, BulkPaymentDateResult, PaymentDetails, PaymentRangeQuery, PaymentResult,
    UpdatePaymentCommand,
};
use super::errors::DomainError;
use super::models::payment::{NewPayment, Payment, PaymentStatus};
use super::models::resident::Resident;
use super::validation::{clean_optional, parse_date, require_date_range, require_non_negative};
use crate::storage::repositories::{PaymentRepository, ResidentRepository};

/// Validate payment details captured with onboarding or renewal
pub fn new_payment_from(details: &PaymentDetails) -> Result<NewPayment, DomainError> {
    let payment_date = parse_date("payment_date", &details.payment_date)?;
    validate_amounts(details.total_amount, details.paid_amount, details.online, details.cash)?;
    if let Some(bill_number) = details.bill_number {
        if bill_number <= 0 {
            return Err(DomainError::validation("bill_number: must be greater than zero"));
        }
    }

    Ok(NewPayment {
        bill_number: details.bill_number,
        payment_date,
        total_amount: details.total_amount,
        paid_amount: details.paid_amount,
        status: PaymentStatus::from_amounts(details.total_amount, details.paid_amount),
        online: details.online,
        cash: details.cash,
        txn_id: clean_optional(details.txn_id.clone()),
    })
}

fn validate_amounts(total: f64, paid: f64, online: Option<f64>, cash: Option<f64>) -> Result<(), DomainError> {
    require_non_negative("total_amount", total)?;
    require_non_negative("paid_amount", paid)?;
    if let Some(online) = online {
        require_non_negative("online", online)?;
    }
    if let Some(cash) = cash {
        require_non_negative("cash", cash)?;
    }
    Ok(())
}

/// Service for reading and correcting payment records
#[derive(Clone)]
pub struct PaymentService {
    payments: PaymentRepository,
    residents: ResidentRepository,
}

impl PaymentService {
    pub fn new(payments: PaymentRepository, residents: ResidentRepository) -> Self {
        Self { payments, residents }
    }

    /// Payments of one resident, newest first
    pub async fn list_payments(&self, reg_code: &str) -> Result<Vec<Payment>> {
        let reg_code = Resident::normalize_reg_code(reg_code);
        info!("Listing payments for {}", reg_code);

        if !self.residents.exists(&reg_code).await? {
            warn!("Resident not found: {}", reg_code);
            return Err(DomainError::not_found(format!("Resident {} not found", reg_code)).into());
        }

        let payments = self.payments.list_for_resident(&reg_code).await?;
        info!("Found {} payments for {}", payments.len(), reg_code);
        Ok(payments)
    }

    pub async fn get_payment(&self, reg_code: &str, payment_id: i64) -> Result<Payment> {
        let reg_code = Resident::normalize_reg_code(reg_code);
        info!("Getting payment {} for {}", payment_id, reg_code);

        self.payments
            .get_for_resident(&reg_code, payment_id)
            .await?
            .ok_or_else(|| {
                warn!("Payment {} not found for {}", payment_id, reg_code);
                DomainError::not_found(format!("Payment {} not found for {}", payment_id, reg_code)).into()
            })
    }

    /// Edit a payment; it must belong to the resident in the command
    pub async fn update_payment(&self, command: UpdatePaymentCommand) -> Result<PaymentResult> {
        let reg_code = Resident::normalize_reg_code(&command.reg_code);
        info!("Updating payment {} for {}", command.payment_id, reg_code);

        let payment_date = parse_date("payment_date", &command.payment_date)?;
        validate_amounts(command.total_amount, command.paid_amount, command.online, command.cash)?;

        let mut payment = self.get_payment(&reg_code, command.payment_id).await?;
        payment.payment_date = payment_date;
        payment.total_amount = command.total_amount;
        payment.paid_amount = command.paid_amount;
        payment.status = command
            .status
            .unwrap_or_else(|| PaymentStatus::from_amounts(command.total_amount, command.paid_amount));
        payment.online = command.online;
        payment.cash = command.cash;
        payment.txn_id = clean_optional(command.txn_id);

        self.payments.update(&payment).await?;
        info!("Updated payment {} (bill {}) for {}", payment.id, payment.bill_number, reg_code);

        Ok(PaymentResult {
            payment,
            success_message: "Payment updated successfully".to_string(),
        })
    }

    /// Payments of all residents dated within the inclusive range
    pub async fn list_payments_between(&self, query: PaymentRangeQuery) -> Result<Vec<Payment>> {
        let start = parse_date("start_date", &query.start_date)?;
        let end = parse_date("end_date", &query.end_date)?;
        require_date_range(start, end)?;
        info!("Listing payments between {} and {}", start, end);

        self.payments.list_between(start, end).await
    }

    pub async fn bulk_update_payment_date(&self, command: BulkPaymentDateCommand) -> Result<BulkPaymentDateResult> {
        let start = parse_date("start_date", &command.start_date)?;
        let end = parse_date("end_date", &command.end_date)?;
        let new_date = parse_date("new_date", &command.new_date)?;
        require_date_range(start, end)?;
        info!("Moving payments dated {}..={} to {}", start, end, new_date);

        let updated_count = self.payments.bulk_update_date(start, end, new_date).await?;
        info!("Moved {} payments to {}", updated_count, new_date);

        Ok(BulkPaymentDateResult {
            updated_count,
            success_message: format!("{} payments updated", updated_count),
        })
    }
}
