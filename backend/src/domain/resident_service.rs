use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use super::commands::resident::{CreateResidentCommand, ResidentResult, UpdateResidentCommand};
use super::errors::DomainError;
use super::models::resident::{Contact, Resident, ResidentProfile, ResidentSummary};
use super::models::subscription::{Subscription, SubscriptionStatus};
use super::payment_service::new_payment_from;
use super::resident_locks::ResidentLocks;
use super::validation::{clean_optional, parse_date, require_email, require_name, require_phone, require_reg_code};
use crate::storage::repositories::ResidentRepository;

/// Profile fields shared by create and update, validated
struct ProfileFields {
    resident: Resident,
    contact: Contact,
}

/// Service for onboarding and maintaining residents
#[derive(Clone)]
pub struct ResidentService {
    residents: ResidentRepository,
    locks: Arc<ResidentLocks>,
}

impl ResidentService {
    pub fn new(residents: ResidentRepository, locks: Arc<ResidentLocks>) -> Self {
        Self { residents, locks }
    }

    /// Onboard a resident with their first subscription and payment
    pub async fn create_resident(&self, command: CreateResidentCommand) -> Result<ResidentResult> {
        info!("Creating resident: reg_code={}", command.reg_code);

        require_reg_code(&command.reg_code)?;
        let reg_code = Resident::normalize_reg_code(&command.reg_code);
        let fields = validate_profile(
            &reg_code,
            &command.first_name,
            &command.last_name,
            &command.guardian_first_name,
            &command.guardian_last_name,
            &command.joining_date,
            command.address,
            command.email,
            &command.phone,
            &command.guardian_phone,
        )?;
        if command.plan_days == 0 {
            return Err(DomainError::validation("plan_days: must be greater than zero").into());
        }
        let payment = new_payment_from(&command.payment)?;

        if self.residents.exists(&reg_code).await? {
            warn!("Resident already exists: {}", reg_code);
            return Err(DomainError::Conflict(format!("Registration number {} already exists", reg_code)).into());
        }

        let subscription = Subscription {
            reg_code: reg_code.clone(),
            number_of_days: command.plan_days,
            renew_date: fields.resident.joining_date,
            remaining_balance: f64::from(command.plan_days),
            plan_type: command.plan_type,
            status: SubscriptionStatus::Active,
        };

        let stored_payment = self
            .residents
            .create(&fields.resident, &fields.contact, &subscription, &payment)
            .await?;
        info!(
            "Created resident {} with bill number {}",
            reg_code, stored_payment.bill_number
        );

        Ok(ResidentResult {
            profile: ResidentProfile {
                resident: fields.resident,
                contact: fields.contact,
                subscription,
            },
            success_message: format!("Resident {} created successfully", reg_code),
        })
    }

    pub async fn get_resident(&self, reg_code: &str) -> Result<ResidentProfile> {
        let reg_code = Resident::normalize_reg_code(reg_code);
        info!("Getting resident: {}", reg_code);

        self.residents.get_profile(&reg_code).await?.ok_or_else(|| {
            warn!("Resident not found: {}", reg_code);
            DomainError::not_found(format!("Resident {} not found", reg_code)).into()
        })
    }

    pub async fn resident_exists(&self, reg_code: &str) -> Result<bool> {
        let reg_code = Resident::normalize_reg_code(reg_code);
        self.residents.exists(&reg_code).await
    }

    pub async fn list_residents(&self) -> Result<Vec<ResidentSummary>> {
        info!("Listing all residents");
        let residents = self.residents.list_summaries().await?;
        info!("Found {} residents", residents.len());
        Ok(residents)
    }

    /// Replace a resident's profile and plan.
    ///
    /// The plan is restarted: the balance is reset to `plan_days` and the
    /// renew date to the joining date. The status is left as it was.
    pub async fn update_resident(&self, command: UpdateResidentCommand) -> Result<ResidentResult> {
        let reg_code = Resident::normalize_reg_code(&command.reg_code);
        info!("Updating resident: {}", reg_code);

        let fields = validate_profile(
            &reg_code,
            &command.first_name,
            &command.last_name,
            &command.guardian_first_name,
            &command.guardian_last_name,
            &command.joining_date,
            command.address,
            command.email,
            &command.phone,
            &command.guardian_phone,
        )?;
        if command.plan_days == 0 {
            return Err(DomainError::validation("plan_days: must be greater than zero").into());
        }

        let _guard = self.locks.acquire(&reg_code).await;
        let existing = self.get_resident(&reg_code).await?;
        let profile = ResidentProfile {
            subscription: Subscription {
                number_of_days: command.plan_days,
                renew_date: fields.resident.joining_date,
                remaining_balance: f64::from(command.plan_days),
                plan_type: command.plan_type,
                ..existing.subscription
            },
            resident: fields.resident,
            contact: fields.contact,
        };

        self.residents.update_profile(&profile).await?;
        info!("Updated resident {}", reg_code);

        Ok(ResidentResult {
            profile,
            success_message: format!("Resident {} updated successfully", reg_code),
        })
    }
}

#[allow(clippy::too_many_arguments)]
fn validate_profile(
    reg_code: &str,
    first_name: &str,
    last_name: &str,
    guardian_first_name: &str,
    guardian_last_name: &str,
    joining_date: &str,
    address: Option<String>,
    email: Option<String>,
    phone: &str,
    guardian_phone: &str,
) -> Result<ProfileFields, DomainError> {
    require_name("first_name", first_name)?;
    require_name("last_name", last_name)?;
    require_name("guardian_first_name", guardian_first_name)?;
    require_name("guardian_last_name", guardian_last_name)?;
    require_phone("phone", phone)?;
    require_phone("guardian_phone", guardian_phone)?;
    require_email(email.as_deref())?;
    let joining_date = parse_date("joining_date", joining_date)?;

    Ok(ProfileFields {
        resident: Resident {
            reg_code: reg_code.to_string(),
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            guardian_first_name: guardian_first_name.trim().to_string(),
            guardian_last_name: guardian_last_name.trim().to_string(),
            joining_date,
        },
        contact: Contact {
            reg_code: reg_code.to_string(),
            address: clean_optional(address),
            email: clean_optional(email),
            phone: phone.trim().to_string(),
            guardian_phone: guardian_phone.trim().to_string(),
        },
    })
}
