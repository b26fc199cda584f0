use std::sync::{Arc, Mutex};

use axum_test::TestServer;
use chrono::Utc;
use sea_orm::DatabaseConnection;

use pizzeria_auth_types::password::PasswordHasher;
use pizzeria_shop::domain::repository::UserRepository;
use pizzeria_shop::domain::types::{
    Customer, DeliveryPerson, NewCustomer, NewDeliveryPerson, NewUser, User, UserSummary,
};
use pizzeria_shop::error::ShopServiceError;
use pizzeria_shop::router::build_router;
use pizzeria_shop::state::AppState;

pub fn test_hasher() -> PasswordHasher {
    PasswordHasher::new("integration-pepper").with_cost(4)
}

/// Router over a database handle that fails every query.
pub fn disconnected_server() -> TestServer {
    let state = AppState {
        db: DatabaseConnection::Disconnected,
        hasher: test_hasher(),
    };
    TestServer::new(build_router(state)).unwrap()
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct Accounts {
    next_id: i32,
    pub users: Vec<User>,
    pub customers: Vec<Customer>,
    pub delivery_persons: Vec<DeliveryPerson>,
}

impl Accounts {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn insert_user(&mut self, user: &NewUser) -> i32 {
        let id = self.next_id();
        self.users.push(User {
            id,
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
            salt: user.salt.clone(),
            role: user.role,
            created_at: Utc::now(),
        });
        id
    }
}

/// Cloneable handle so a test can hand the same store to several use cases.
#[derive(Clone, Default)]
pub struct MockUserRepo {
    pub accounts: Arc<Mutex<Accounts>>,
}

impl MockUserRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ShopServiceError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, ShopServiceError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.users.iter().find(|u| u.id == id).cloned())
    }

    async fn create_customer(
        &self,
        user: &NewUser,
        customer: &NewCustomer,
    ) -> Result<i32, ShopServiceError> {
        let mut accounts = self.accounts.lock().unwrap();
        let user_id = accounts.insert_user(user);
        let id = accounts.next_id();
        accounts.customers.push(Customer {
            id,
            user_id,
            name: customer.name.clone(),
            gender: customer.gender.clone(),
            birth_date: customer.birth_date,
            address: customer.address.clone(),
            postal_code: customer.postal_code.clone(),
        });
        Ok(user_id)
    }

    async fn create_delivery_person(
        &self,
        user: &NewUser,
        person: &NewDeliveryPerson,
    ) -> Result<i32, ShopServiceError> {
        let mut accounts = self.accounts.lock().unwrap();
        let user_id = accounts.insert_user(user);
        let id = accounts.next_id();
        accounts.delivery_persons.push(DeliveryPerson {
            id,
            user_id,
            name: person.name.clone(),
            vehicle_type: person.vehicle_type.clone(),
            unavailable_until: None,
        });
        Ok(user_id)
    }

    async fn create_admin(&self, user: &NewUser) -> Result<i32, ShopServiceError> {
        Ok(self.accounts.lock().unwrap().insert_user(user))
    }

    async fn list_non_admin(&self) -> Result<Vec<UserSummary>, ShopServiceError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts
            .users
            .iter()
            .rev()
            .filter(|u| u.role != pizzeria_domain::role::Role::Admin)
            .map(|u| UserSummary {
                id: u.id,
                username: u.username.clone(),
                role: u.role,
                created_at: u.created_at,
                customer: accounts.customers.iter().find(|c| c.user_id == u.id).cloned(),
                delivery_person: accounts
                    .delivery_persons
                    .iter()
                    .find(|d| d.user_id == u.id)
                    .cloned(),
            })
            .collect())
    }

    async fn delete(&self, id: i32) -> Result<(), ShopServiceError> {
        let mut accounts = self.accounts.lock().unwrap();
        let before = accounts.users.len();
        accounts.users.retain(|u| u.id != id);
        if accounts.users.len() == before {
            return Err(ShopServiceError::UserNotFound);
        }
        accounts.customers.retain(|c| c.user_id != id);
        accounts.delivery_persons.retain(|d| d.user_id != id);
        Ok(())
    }

    async fn find_customer_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Option<Customer>, ShopServiceError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.customers.iter().find(|c| c.user_id == user_id).cloned())
    }

    async fn find_delivery_person_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Option<DeliveryPerson>, ShopServiceError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts
            .delivery_persons
            .iter()
            .find(|d| d.user_id == user_id)
            .cloned())
    }

    async fn find_delivery_person(
        &self,
        id: i32,
    ) -> Result<Option<DeliveryPerson>, ShopServiceError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.delivery_persons.iter().find(|d| d.id == id).cloned())
    }

    async fn list_delivery_persons(&self) -> Result<Vec<DeliveryPerson>, ShopServiceError> {
        Ok(self.accounts.lock().unwrap().delivery_persons.clone())
    }
}
