pub mod account;
pub mod admin;
pub mod catalog;
pub mod delivery;
pub mod discount;
pub mod order;

use pizzeria_auth_types::credentials::Credentials;
use pizzeria_domain::role::Role;

use crate::domain::types::User;
use crate::error::ShopServiceError;
use crate::infra::db::DbUserRepository;
use crate::state::AppState;
use crate::usecase::account::AuthenticateUseCase;

fn authenticate_usecase(state: &AppState) -> AuthenticateUseCase<DbUserRepository> {
    AuthenticateUseCase {
        repo: state.user_repo(),
        hasher: state.hasher.clone(),
    }
}

/// Re-verify the credentials sent with the request and require `role`.
pub(crate) async fn authorize(
    state: &AppState,
    credentials: &Credentials,
    role: Role,
) -> Result<User, ShopServiceError> {
    authenticate_usecase(state)
        .execute_as(&credentials.username, &credentials.password, role)
        .await
}

/// Verify credentials sent in a JSON body, whatever the role.
pub(crate) async fn authenticate(
    state: &AppState,
    username: &str,
    password: &str,
) -> Result<User, ShopServiceError> {
    authenticate_usecase(state).execute(username, password).await
}

/// Customer endpoints carry the credentials in the JSON body.
pub(crate) async fn authorize_customer(
    state: &AppState,
    username: &str,
    password: &str,
) -> Result<User, ShopServiceError> {
    authenticate_usecase(state)
        .execute_as(username, password, Role::Customer)
        .await
}
