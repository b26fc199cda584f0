use tracing::info;

use pizzeria_domain::role::Role;

use crate::domain::repository::UserRepository;
use crate::domain::types::{DeliveryPerson, UserSummary};
use crate::error::ShopServiceError;

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<UserSummary>, ShopServiceError> {
        self.repo.list_non_admin().await
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> DeleteUserUseCase<R> {
    pub async fn execute(&self, user_id: i32) -> Result<(), ShopServiceError> {
        let user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(ShopServiceError::UserNotFound)?;
        if user.role == Role::Admin {
            return Err(ShopServiceError::CannotDeleteAdmin);
        }
        self.repo.delete(user_id).await?;
        info!(user_id, username = %user.username, role = %user.role, "user deleted");
        Ok(())
    }
}

// ── ListDeliveryPersons ──────────────────────────────────────────────────────

pub struct ListDeliveryPersonsUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListDeliveryPersonsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<DeliveryPerson>, ShopServiceError> {
        self.repo.list_delivery_persons().await
    }
}

// ── DeleteDeliveryPerson ─────────────────────────────────────────────────────

pub struct DeleteDeliveryPersonUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> DeleteDeliveryPersonUseCase<R> {
    /// Delete by delivery-person id; the underlying account goes with it.
    pub async fn execute(&self, delivery_person_id: i32) -> Result<(), ShopServiceError> {
        let person = self
            .repo
            .find_delivery_person(delivery_person_id)
            .await?
            .ok_or(ShopServiceError::DeliveryPersonNotFound)?;
        self.repo.delete(person.user_id).await?;
        info!(delivery_person_id, user_id = person.user_id, "delivery person deleted");
        Ok(())
    }
}
