use crate::domain::commands::payment::{
    BulkPaymentDateCommand, BulkPaymentDateResult, PaymentDetails, PaymentRangeQuery, PaymentResult,
    UpdatePaymentCommand,
};
use crate::domain::models::payment::{Payment as DomainPayment, PaymentStatus as DomainStatus};
use crate::domain::validation::format_date;
use shared::{
    BulkPaymentDateRequest, BulkPaymentDateResponse, Payment as SharedPayment, PaymentInput, PaymentListResponse,
    PaymentResponse, PaymentStatus as SharedStatus, UpdatePaymentRequest,
};

/// Mapper to convert between shared payment DTOs and domain payments.
pub struct PaymentMapper;

impl PaymentMapper {
    pub fn status_to_domain(status: SharedStatus) -> DomainStatus {
        match status {
            SharedStatus::Complete => DomainStatus::Complete,
            SharedStatus::Pending => DomainStatus::Pending,
        }
    }

    pub fn status_to_dto(status: DomainStatus) -> SharedStatus {
        match status {
            DomainStatus::Complete => SharedStatus::Complete,
            DomainStatus::Pending => SharedStatus::Pending,
        }
    }

    pub fn to_dto(domain: DomainPayment) -> SharedPayment {
        SharedPayment {
            pending_amount: domain.pending_amount(),
            id: domain.id,
            reg_code: domain.reg_code,
            bill_number: domain.bill_number,
            payment_date: format_date(domain.payment_date),
            total_amount: domain.total_amount,
            paid_amount: domain.paid_amount,
            status: Self::status_to_dto(domain.status),
            online: domain.online,
            cash: domain.cash,
            txn_id: domain.txn_id,
        }
    }

    pub fn to_list_dto(payments: Vec<DomainPayment>) -> PaymentListResponse {
        PaymentListResponse {
            payments: payments.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_details(input: PaymentInput) -> PaymentDetails {
        PaymentDetails {
            bill_number: input.bill_number,
            payment_date: input.payment_date,
            total_amount: input.total_amount,
            paid_amount: input.paid_amount,
            online: input.online,
            cash: input.cash,
            txn_id: input.txn_id,
        }
    }

    pub fn to_update_command(reg_code: String, payment_id: i64, request: UpdatePaymentRequest) -> UpdatePaymentCommand {
        UpdatePaymentCommand {
            reg_code,
            payment_id,
            payment_date: request.payment_date,
            total_amount: request.total_amount,
            paid_amount: request.paid_amount,
            status: request.status.map(Self::status_to_domain),
            online: request.online,
            cash: request.cash,
            txn_id: request.txn_id,
        }
    }

    pub fn to_payment_response(result: PaymentResult) -> PaymentResponse {
        PaymentResponse {
            payment: Self::to_dto(result.payment),
            success_message: result.success_message,
        }
    }

    pub fn to_range_query(start_date: String, end_date: String) -> PaymentRangeQuery {
        PaymentRangeQuery { start_date, end_date }
    }

    pub fn to_bulk_date_command(request: BulkPaymentDateRequest) -> BulkPaymentDateCommand {
        BulkPaymentDateCommand {
            start_date: request.start_date,
            end_date: request.end_date,
            new_date: request.new_date,
        }
    }

    pub fn to_bulk_date_response(result: BulkPaymentDateResult) -> BulkPaymentDateResponse {
        BulkPaymentDateResponse {
            updated_count: result.updated_count,
            success_message: result.success_message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_to_dto_computes_pending_amount() {
        let dto = PaymentMapper::to_dto(DomainPayment {
            id: 3,
            reg_code: "UG0001".to_string(),
            bill_number: 12,
            payment_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            total_amount: 3000.0,
            paid_amount: 2500.0,
            status: DomainStatus::Pending,
            online: Some(2500.0),
            cash: None,
            txn_id: None,
        });
        assert_eq!(dto.pending_amount, 500.0);
        assert_eq!(dto.payment_date, "2024-01-05");
        assert_eq!(dto.status, SharedStatus::Pending);
    }
}
