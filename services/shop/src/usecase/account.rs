use tracing::{info, warn};

use pizzeria_auth_types::password::PasswordHasher;
use pizzeria_domain::birthday::parse_birth_date;
use pizzeria_domain::role::Role;

use crate::domain::repository::UserRepository;
use crate::domain::types::{
    Customer, DEFAULT_VEHICLE_TYPE, MAX_ADDRESS_LEN, MAX_GENDER_LEN, MAX_NAME_LEN,
    MAX_POSTAL_CODE_LEN, MAX_USERNAME_LEN, NewCustomer, NewDeliveryPerson, NewUser, User,
    validate_text,
};
use crate::error::ShopServiceError;

async fn hash_new_user(
    hasher: &PasswordHasher,
    username: &str,
    password: &str,
    role: Role,
) -> Result<NewUser, ShopServiceError> {
    let hashed = hasher
        .hash_async(password)
        .await
        .map_err(|e| ShopServiceError::Internal(e.into()))?;
    Ok(NewUser {
        username: username.to_owned(),
        password_hash: hashed.hash,
        salt: hashed.salt,
        role,
    })
}

fn validate_login(username: &str, password: &str) -> Result<(), ShopServiceError> {
    validate_text("username", username, MAX_USERNAME_LEN)?;
    if password.is_empty() {
        return Err(ShopServiceError::Validation("password must not be empty".into()));
    }
    Ok(())
}

async fn ensure_username_free<R: UserRepository>(
    repo: &R,
    username: &str,
) -> Result<(), ShopServiceError> {
    if repo.find_by_username(username).await?.is_some() {
        return Err(ShopServiceError::UsernameTaken);
    }
    Ok(())
}

// ── Authenticate ─────────────────────────────────────────────────────────────

pub struct AuthenticateUseCase<R: UserRepository> {
    pub repo: R,
    pub hasher: PasswordHasher,
}

impl<R: UserRepository> AuthenticateUseCase<R> {
    /// Verify a username and password. Unknown user and wrong password are indistinguishable.
    pub async fn execute(&self, username: &str, password: &str) -> Result<User, ShopServiceError> {
        let Some(user) = self.repo.find_by_username(username).await? else {
            self.hasher
                .verify_missing(password)
                .await
                .map_err(|e| ShopServiceError::Internal(e.into()))?;
            warn!(username, "login attempt for unknown user");
            return Err(ShopServiceError::InvalidCredentials);
        };
        let matches = self
            .hasher
            .verify_async(password, &user.salt, &user.password_hash)
            .await
            .map_err(|e| ShopServiceError::Internal(e.into()))?;
        if !matches {
            warn!(username, "login attempt with wrong password");
            return Err(ShopServiceError::InvalidCredentials);
        }
        Ok(user)
    }

    /// Verify credentials and require `role`.
    pub async fn execute_as(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<User, ShopServiceError> {
        let user = self.execute(username, password).await?;
        if user.role != role {
            warn!(username, role = %user.role, required = %role, "role mismatch");
            return Err(ShopServiceError::Forbidden);
        }
        Ok(user)
    }
}

// ── RegisterCustomer ─────────────────────────────────────────────────────────

pub struct RegisterCustomerInput {
    pub username: String,
    pub password: String,
    pub name: String,
    pub gender: String,
    pub birth_date: String,
    pub no_birth_date: bool,
    pub address: String,
    pub postal_code: String,
}

pub struct RegisterCustomerUseCase<R: UserRepository> {
    pub repo: R,
    pub hasher: PasswordHasher,
}

impl<R: UserRepository> RegisterCustomerUseCase<R> {
    /// Validate in field order, then insert the account and its profile. Returns the user id.
    pub async fn execute(&self, input: RegisterCustomerInput) -> Result<i32, ShopServiceError> {
        validate_login(&input.username, &input.password)?;
        validate_text("name", &input.name, MAX_NAME_LEN)?;
        validate_text("gender", &input.gender, MAX_GENDER_LEN)?;
        let birth_date = if input.no_birth_date {
            None
        } else {
            Some(parse_birth_date(input.birth_date.trim()).ok_or_else(|| {
                ShopServiceError::Validation("birth date must be in YYYY-MM-DD format".into())
            })?)
        };
        validate_text("address", &input.address, MAX_ADDRESS_LEN)?;
        validate_text("postcode", &input.postal_code, MAX_POSTAL_CODE_LEN)?;
        ensure_username_free(&self.repo, &input.username).await?;

        let user =
            hash_new_user(&self.hasher, &input.username, &input.password, Role::Customer).await?;
        let customer = NewCustomer {
            name: input.name,
            gender: input.gender,
            birth_date,
            address: input.address,
            postal_code: input.postal_code,
        };
        let user_id = self.repo.create_customer(&user, &customer).await?;
        info!(user_id, username = %user.username, "customer registered");
        Ok(user_id)
    }
}

// ── CreateDeliveryPerson ─────────────────────────────────────────────────────

pub struct CreateDeliveryPersonInput {
    pub username: String,
    pub password: String,
    pub name: String,
    pub vehicle_type: Option<String>,
}

pub struct CreateDeliveryPersonUseCase<R: UserRepository> {
    pub repo: R,
    pub hasher: PasswordHasher,
}

impl<R: UserRepository> CreateDeliveryPersonUseCase<R> {
    pub async fn execute(&self, input: CreateDeliveryPersonInput) -> Result<i32, ShopServiceError> {
        validate_login(&input.username, &input.password)?;
        validate_text("name", &input.name, MAX_NAME_LEN)?;
        let vehicle_type = input
            .vehicle_type
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_VEHICLE_TYPE.to_owned());
        validate_text("vehicle type", &vehicle_type, MAX_GENDER_LEN)?;
        ensure_username_free(&self.repo, &input.username).await?;

        let user =
            hash_new_user(&self.hasher, &input.username, &input.password, Role::Delivery).await?;
        let person = NewDeliveryPerson {
            name: input.name,
            vehicle_type,
        };
        let user_id = self.repo.create_delivery_person(&user, &person).await?;
        info!(user_id, username = %user.username, "delivery person created");
        Ok(user_id)
    }
}

// ── CreateAdmin ──────────────────────────────────────────────────────────────

pub struct CreateAdminUseCase<R: UserRepository> {
    pub repo: R,
    pub hasher: PasswordHasher,
}

impl<R: UserRepository> CreateAdminUseCase<R> {
    pub async fn execute(&self, username: &str, password: &str) -> Result<i32, ShopServiceError> {
        validate_login(username, password)?;
        ensure_username_free(&self.repo, username).await?;
        let user = hash_new_user(&self.hasher, username, password, Role::Admin).await?;
        let user_id = self.repo.create_admin(&user).await?;
        info!(user_id, username, "admin created");
        Ok(user_id)
    }

    /// Create the admin unless the username already exists. Returns whether it was created.
    pub async fn ensure(&self, username: &str, password: &str) -> Result<bool, ShopServiceError> {
        match self.repo.find_by_username(username).await? {
            Some(existing) => {
                if existing.role != Role::Admin {
                    warn!(username, role = %existing.role, "bootstrap admin name belongs to another role");
                }
                Ok(false)
            }
            None => self.execute(username, password).await.map(|_| true),
        }
    }
}

// ── GetAccount ───────────────────────────────────────────────────────────────

pub struct GetAccountUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetAccountUseCase<R> {
    pub async fn execute(&self, user: &User) -> Result<Customer, ShopServiceError> {
        self.repo
            .find_customer_by_user_id(user.id)
            .await?
            .ok_or(ShopServiceError::CustomerNotFound)
    }
}
