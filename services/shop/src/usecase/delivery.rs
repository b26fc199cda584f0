use chrono::{DateTime, Utc};
use tracing::info;

use pizzeria_domain::order::OrderStatus;

use crate::domain::repository::{DeliveryRepository, OrderRepository, UserRepository};
use crate::domain::types::{ClosedBy, DeliveryPerson, OrderSummary, User, cooldown_after};
use crate::error::ShopServiceError;

async fn delivery_person_of<U: UserRepository>(
    users: &U,
    user: &User,
) -> Result<DeliveryPerson, ShopServiceError> {
    users
        .find_delivery_person_by_user_id(user.id)
        .await?
        .ok_or(ShopServiceError::DeliveryPersonNotFound)
}

// ── ListAvailableDeliveries ──────────────────────────────────────────────────

pub struct ListAvailableDeliveriesUseCase<D: DeliveryRepository> {
    pub deliveries: D,
}

impl<D: DeliveryRepository> ListAvailableDeliveriesUseCase<D> {
    pub async fn execute(&self) -> Result<Vec<OrderSummary>, ShopServiceError> {
        self.deliveries.list_available().await
    }
}

// ── ListAssignedDeliveries ───────────────────────────────────────────────────

pub struct ListAssignedDeliveriesUseCase<U: UserRepository, D: DeliveryRepository> {
    pub users: U,
    pub deliveries: D,
}

impl<U: UserRepository, D: DeliveryRepository> ListAssignedDeliveriesUseCase<U, D> {
    pub async fn execute(&self, user: &User) -> Result<Vec<OrderSummary>, ShopServiceError> {
        let person = delivery_person_of(&self.users, user).await?;
        self.deliveries.list_assigned(person.id).await
    }
}

// ── AssignDelivery ───────────────────────────────────────────────────────────

pub struct AssignDeliveryUseCase<U: UserRepository, D: DeliveryRepository> {
    pub users: U,
    pub deliveries: D,
}

impl<U: UserRepository, D: DeliveryRepository> AssignDeliveryUseCase<U, D> {
    /// The calling delivery person takes `order_id`.
    pub async fn execute(
        &self,
        user: &User,
        order_id: i32,
        now: DateTime<Utc>,
    ) -> Result<(), ShopServiceError> {
        let person = delivery_person_of(&self.users, user).await?;
        self.deliveries.assign(order_id, person.id, now).await?;
        info!(order_id, delivery_person_id = person.id, "delivery assigned");
        Ok(())
    }
}

// ── UpdateDeliveryStatus ─────────────────────────────────────────────────────

pub struct UpdateDeliveryStatusUseCase<U: UserRepository, D: DeliveryRepository> {
    pub users: U,
    pub deliveries: D,
}

impl<U: UserRepository, D: DeliveryRepository> UpdateDeliveryStatusUseCase<U, D> {
    /// Close one of the caller's deliveries as DELIVERED or FAILED.
    pub async fn execute(
        &self,
        user: &User,
        order_id: i32,
        status: &str,
        now: DateTime<Utc>,
    ) -> Result<(), ShopServiceError> {
        let status: OrderStatus = status
            .trim()
            .parse()
            .map_err(|_| ShopServiceError::InvalidStatus)?;
        let Some(cooldown) = cooldown_after(status, now) else {
            return Err(ShopServiceError::InvalidStatus);
        };

        let person = delivery_person_of(&self.users, user).await?;
        self.deliveries
            .finish(order_id, status, cooldown, ClosedBy::DeliveryPerson(person.id))
            .await?;
        info!(order_id, delivery_person_id = person.id, status = %status, "delivery status updated");
        Ok(())
    }
}

// ── AdminAssignDelivery ──────────────────────────────────────────────────────

pub struct AdminAssignDeliveryUseCase<O: OrderRepository, D: DeliveryRepository> {
    pub orders: O,
    pub deliveries: D,
}

impl<O: OrderRepository, D: DeliveryRepository> AdminAssignDeliveryUseCase<O, D> {
    /// Assign through the guarded path, or unassign when no delivery person is chosen.
    pub async fn execute(
        &self,
        order_id: i32,
        delivery_person_id: Option<i32>,
        now: DateTime<Utc>,
    ) -> Result<(), ShopServiceError> {
        match delivery_person_id {
            Some(person_id) => {
                self.deliveries.assign(order_id, person_id, now).await?;
                info!(order_id, delivery_person_id = person_id, "delivery assigned by admin");
            }
            None => {
                self.orders.unassign(order_id).await?;
                info!(order_id, "delivery unassigned by admin");
            }
        }
        Ok(())
    }
}
