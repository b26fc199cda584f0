use sea_orm::DatabaseConnection;

use pizzeria_auth_types::password::PasswordHasher;

use crate::infra::db::{
    DbDeliveryRepository, DbDiscountCodeRepository, DbExtraItemRepository,
    DbIngredientRepository, DbOrderRepository, DbPizzaRepository, DbUserRepository,
};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub hasher: PasswordHasher,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn ingredient_repo(&self) -> DbIngredientRepository {
        DbIngredientRepository {
            db: self.db.clone(),
        }
    }

    pub fn pizza_repo(&self) -> DbPizzaRepository {
        DbPizzaRepository {
            db: self.db.clone(),
        }
    }

    pub fn extra_item_repo(&self) -> DbExtraItemRepository {
        DbExtraItemRepository {
            db: self.db.clone(),
        }
    }

    pub fn discount_code_repo(&self) -> DbDiscountCodeRepository {
        DbDiscountCodeRepository {
            db: self.db.clone(),
        }
    }

    pub fn order_repo(&self) -> DbOrderRepository {
        DbOrderRepository {
            db: self.db.clone(),
        }
    }

    pub fn delivery_repo(&self) -> DbDeliveryRepository {
        DbDeliveryRepository {
            db: self.db.clone(),
        }
    }
}
