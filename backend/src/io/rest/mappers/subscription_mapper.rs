use crate::domain::commands::subscription::{
    RenewSubscriptionCommand, RenewSubscriptionResult, UpdateStatusCommand, UpdateStatusResult,
};
use crate::domain::models::subscription::{
    PlanType as DomainPlanType, Subscription as DomainSubscription, SubscriptionStatus as DomainStatus,
};
use crate::domain::validation::format_date;
use crate::io::rest::mappers::payment_mapper::PaymentMapper;
use shared::{
    PlanType as SharedPlanType, RenewSubscriptionRequest, RenewSubscriptionResponse, Subscription as SharedSubscription,
    SubscriptionResponse, SubscriptionStatus as SharedStatus, UpdateStatusRequest, UpdateStatusResponse,
};

/// Mapper to convert between shared subscription DTOs and domain models.
pub struct SubscriptionMapper;

impl SubscriptionMapper {
    pub fn plan_to_domain(plan: SharedPlanType) -> DomainPlanType {
        match plan {
            SharedPlanType::Single => DomainPlanType::Single,
            SharedPlanType::Both => DomainPlanType::Both,
        }
    }

    pub fn plan_to_dto(plan: DomainPlanType) -> SharedPlanType {
        match plan {
            DomainPlanType::Single => SharedPlanType::Single,
            DomainPlanType::Both => SharedPlanType::Both,
        }
    }

    pub fn status_to_domain(status: SharedStatus) -> DomainStatus {
        match status {
            SharedStatus::Active => DomainStatus::Active,
            SharedStatus::Inactive => DomainStatus::Inactive,
        }
    }

    pub fn status_to_dto(status: DomainStatus) -> SharedStatus {
        match status {
            DomainStatus::Active => SharedStatus::Active,
            DomainStatus::Inactive => SharedStatus::Inactive,
        }
    }

    pub fn to_dto(domain: DomainSubscription) -> SharedSubscription {
        SharedSubscription {
            number_of_days: domain.number_of_days,
            renew_date: format_date(domain.renew_date),
            remaining_balance: domain.remaining_balance,
            plan_type: Self::plan_to_dto(domain.plan_type),
            status: Self::status_to_dto(domain.status),
        }
    }

    pub fn to_subscription_response(domain: DomainSubscription) -> SubscriptionResponse {
        SubscriptionResponse {
            reg_code: domain.reg_code.clone(),
            subscription: Self::to_dto(domain),
        }
    }

    pub fn to_renew_command(reg_code: String, request: RenewSubscriptionRequest) -> RenewSubscriptionCommand {
        RenewSubscriptionCommand {
            reg_code,
            plan_days: request.plan_days,
            plan_type: Self::plan_to_domain(request.plan_type),
            status: Self::status_to_domain(request.status),
            renew_date: request.renew_date,
            payment: PaymentMapper::to_details(request.payment),
        }
    }

    pub fn to_renew_response(result: RenewSubscriptionResult) -> RenewSubscriptionResponse {
        RenewSubscriptionResponse {
            reg_code: result.subscription.reg_code.clone(),
            subscription: Self::to_dto(result.subscription),
            payment: PaymentMapper::to_dto(result.payment),
            expected_end_date: format_date(result.expected_end_date),
            success_message: result.success_message,
        }
    }

    pub fn to_status_command(reg_code: String, request: UpdateStatusRequest) -> UpdateStatusCommand {
        UpdateStatusCommand {
            reg_code,
            status: Self::status_to_domain(request.status),
        }
    }

    pub fn to_status_response(result: UpdateStatusResult) -> UpdateStatusResponse {
        UpdateStatusResponse {
            reg_code: result.subscription.reg_code.clone(),
            subscription: Self::to_dto(result.subscription),
            success_message: result.success_message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_to_dto_formats_renew_date() {
        let dto = SubscriptionMapper::to_dto(DomainSubscription {
            reg_code: "UG0001".to_string(),
            number_of_days: 30,
            renew_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            remaining_balance: 12.5,
            plan_type: DomainPlanType::Both,
            status: DomainStatus::Inactive,
        });
        assert_eq!(dto.renew_date, "2024-01-01");
        assert_eq!(dto.plan_type, SharedPlanType::Both);
        assert_eq!(dto.status, SharedStatus::Inactive);
    }
}
