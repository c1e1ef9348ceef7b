use anyhow::Result;
use tracing::{info, warn};

use super::commands::guest::{CreateGuestCommand, GuestResult};
use super::errors::DomainError;
use super::models::guest::Guest;
use super::validation::{parse_date, require_positive};
use crate::storage::repositories::GuestRepository;

const MAX_GUEST_NAME_LEN: usize = 100;

/// Service for walk-in guest meal bills
#[derive(Clone)]
pub struct GuestService {
    guests: GuestRepository,
}

impl GuestService {
    pub fn new(guests: GuestRepository) -> Self {
        Self { guests }
    }

    pub async fn add_guest(&self, command: CreateGuestCommand) -> Result<GuestResult> {
        info!("Adding guest: name={}, amount={}", command.name, command.pay_amount);

        let name = command.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name: cannot be empty").into());
        }
        if name.chars().count() > MAX_GUEST_NAME_LEN {
            return Err(DomainError::validation(format!(
                "name: cannot exceed {} characters",
                MAX_GUEST_NAME_LEN
            ))
            .into());
        }
        require_positive("pay_amount", command.pay_amount)?;
        let pay_date = parse_date("pay_date", &command.pay_date)?;

        let guest = self
            .guests
            .insert(&Guest {
                id: 0,
                name: name.to_string(),
                pay_mode: command.pay_mode,
                pay_amount: command.pay_amount,
                pay_date,
            })
            .await?;
        info!("Added guest {} with ID: {}", guest.name, guest.id);

        Ok(GuestResult {
            guest,
            success_message: "Guest added successfully".to_string(),
        })
    }

    pub async fn list_guests(&self) -> Result<Vec<Guest>> {
        info!("Listing guests");
        self.guests.list().await
    }

    pub async fn delete_guest(&self, id: i64) -> Result<()> {
        info!("Deleting guest: {}", id);

        if !self.guests.delete(id).await? {
            warn!("Guest not found: {}", id);
            return Err(DomainError::not_found(format!("Guest {} not found", id)).into());
        }

        info!("Deleted guest {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::guest::PayMode;
    use crate::storage::connection::DbConnection;

    async fn setup_test() -> GuestService {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        GuestService::new(GuestRepository::new(db))
    }

    fn command(name: &str, amount: f64) -> CreateGuestCommand {
        CreateGuestCommand {
            name: name.to_string(),
            pay_mode: PayMode::Online,
            pay_amount: amount,
            pay_date: "2024-03-01".to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_and_delete_guest() {
        let service = setup_test().await;
        let added = service.add_guest(command(" Kiran Shah ", 80.0)).await.unwrap();
        assert_eq!(added.guest.name, "Kiran Shah");
        assert_eq!(service.list_guests().await.unwrap(), vec![added.guest.clone()]);

        service.delete_guest(added.guest.id).await.unwrap();
        assert!(service.list_guests().await.unwrap().is_empty());

        let err = service.delete_guest(added.guest.id).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<DomainError>(), Some(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_add_guest_validation() {
        let service = setup_test().await;
        for bad in [command("  ", 80.0), command("Kiran", 0.0), command("Kiran", -10.0)] {
            let err = service.add_guest(bad).await.unwrap_err();
            assert!(matches!(err.downcast_ref::<DomainError>(), Some(DomainError::Validation(_))));
        }
    }
}
