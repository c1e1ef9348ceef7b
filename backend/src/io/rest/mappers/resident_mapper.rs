use crate::domain::commands::resident::{CreateResidentCommand, ResidentResult, UpdateResidentCommand};
use crate::domain::models::resident::{ResidentProfile, ResidentSummary as DomainSummary};
use crate::domain::validation::format_date;
use crate::io::rest::mappers::payment_mapper::PaymentMapper;
use crate::io::rest::mappers::subscription_mapper::SubscriptionMapper;
use shared::{
    Contact as SharedContact, CreateResidentRequest, Resident as SharedResident, ResidentExistsResponse,
    ResidentListResponse, ResidentResponse, ResidentSummary as SharedSummary, UpdateResidentRequest,
};

/// Mapper to convert between shared resident DTOs and domain models.
pub struct ResidentMapper;

impl ResidentMapper {
    pub fn to_create_command(request: CreateResidentRequest) -> CreateResidentCommand {
        CreateResidentCommand {
            reg_code: request.reg_code,
            first_name: request.first_name,
            last_name: request.last_name,
            guardian_first_name: request.guardian_first_name,
            guardian_last_name: request.guardian_last_name,
            joining_date: request.joining_date,
            address: request.address,
            email: request.email,
            phone: request.phone,
            guardian_phone: request.guardian_phone,
            plan_type: SubscriptionMapper::plan_to_domain(request.plan_type),
            plan_days: request.plan_days,
            payment: PaymentMapper::to_details(request.payment),
        }
    }

    pub fn to_update_command(reg_code: String, request: UpdateResidentRequest) -> UpdateResidentCommand {
        UpdateResidentCommand {
            reg_code,
            first_name: request.first_name,
            last_name: request.last_name,
            guardian_first_name: request.guardian_first_name,
            guardian_last_name: request.guardian_last_name,
            joining_date: request.joining_date,
            address: request.address,
            email: request.email,
            phone: request.phone,
            guardian_phone: request.guardian_phone,
            plan_type: SubscriptionMapper::plan_to_domain(request.plan_type),
            plan_days: request.plan_days,
        }
    }

    pub fn to_dto(profile: ResidentProfile) -> SharedResident {
        let ResidentProfile {
            resident,
            contact,
            subscription,
        } = profile;

        SharedResident {
            reg_code: resident.reg_code,
            first_name: resident.first_name,
            last_name: resident.last_name,
            guardian_first_name: resident.guardian_first_name,
            guardian_last_name: resident.guardian_last_name,
            joining_date: format_date(resident.joining_date),
            contact: SharedContact {
                address: contact.address,
                email: contact.email,
                phone: contact.phone,
                guardian_phone: contact.guardian_phone,
            },
            subscription: SubscriptionMapper::to_dto(subscription),
        }
    }

    pub fn to_resident_response(result: ResidentResult) -> ResidentResponse {
        ResidentResponse {
            resident: Self::to_dto(result.profile),
            success_message: result.success_message,
        }
    }

    pub fn to_list_dto(summaries: Vec<DomainSummary>) -> ResidentListResponse {
        ResidentListResponse {
            residents: summaries
                .into_iter()
                .map(|summary| SharedSummary {
                    reg_code: summary.reg_code,
                    first_name: summary.first_name,
                    last_name: summary.last_name,
                    remaining_balance: summary.remaining_balance,
                    renew_date: format_date(summary.renew_date),
                })
                .collect(),
        }
    }

    pub fn to_exists_dto(reg_code: String, exists: bool) -> ResidentExistsResponse {
        ResidentExistsResponse { reg_code, exists }
    }
}
