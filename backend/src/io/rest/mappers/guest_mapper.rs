use crate::domain::commands::guest::{CreateGuestCommand, GuestResult};
use crate::domain::models::guest::{Guest as DomainGuest, PayMode as DomainPayMode};
use crate::domain::validation::format_date;
use shared::{CreateGuestRequest, Guest as SharedGuest, GuestListResponse, GuestResponse, PayMode as SharedPayMode};

pub struct GuestMapper;

impl GuestMapper {
    pub fn to_command(request: CreateGuestRequest) -> CreateGuestCommand {
        CreateGuestCommand {
            name: request.name,
            pay_mode: match request.pay_mode {
                SharedPayMode::Online => DomainPayMode::Online,
                SharedPayMode::Cash => DomainPayMode::Cash,
            },
            pay_amount: request.pay_amount,
            pay_date: request.pay_date,
        }
    }

    pub fn to_dto(domain: DomainGuest) -> SharedGuest {
        SharedGuest {
            id: domain.id,
            name: domain.name,
            pay_mode: match domain.pay_mode {
                DomainPayMode::Online => SharedPayMode::Online,
                DomainPayMode::Cash => SharedPayMode::Cash,
            },
            pay_amount: domain.pay_amount,
            pay_date: format_date(domain.pay_date),
        }
    }

    pub fn to_guest_response(result: GuestResult) -> GuestResponse {
        GuestResponse {
            guest: Self::to_dto(result.guest),
            success_message: result.success_message,
        }
    }

    pub fn to_list_dto(guests: Vec<DomainGuest>) -> GuestListResponse {
        GuestListResponse {
            guests: guests.into_iter().map(Self::to_dto).collect(),
        }
    }
}
