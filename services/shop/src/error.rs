use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Shop service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum ShopServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("forbidden")]
    Forbidden,
    #[error("user not found")]
    UserNotFound,
    #[error("customer not found")]
    CustomerNotFound,
    #[error("delivery person not found")]
    DeliveryPersonNotFound,
    #[error("order not found")]
    OrderNotFound,
    #[error("pizza not found")]
    PizzaNotFound,
    #[error("ingredient not found")]
    IngredientNotFound,
    #[error("extra item not found")]
    ExtraItemNotFound,
    #[error("discount code not found")]
    DiscountCodeNotFound,
    #[error("username already taken")]
    UsernameTaken,
    #[error("pizza already exists")]
    PizzaAlreadyExists,
    #[error("ingredient already exists")]
    IngredientAlreadyExists,
    #[error("discount code already exists")]
    DiscountCodeAlreadyExists,
    #[error("ingredient is used by a pizza")]
    IngredientInUse,
    #[error("order is not available for delivery")]
    OrderNotAvailable,
    #[error("order is already assigned")]
    OrderAlreadyAssigned,
    #[error("delivery person is unavailable")]
    DeliveryPersonUnavailable,
    #[error("delivery person already has an active delivery")]
    DeliveryPersonBusy,
    #[error("invalid status")]
    InvalidStatus,
    #[error("discount code already used")]
    DiscountAlreadyUsed,
    #[error("admin users cannot be deleted")]
    CannotDeleteAdmin,
    #[error("cart is empty")]
    EmptyCart,
    #[error("quantity must be at least 1")]
    InvalidQuantity,
    #[error("category must be dessert or drink")]
    InvalidCategory,
    #[error("discount percentage must be between 1 and 100")]
    InvalidPercentage,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ShopServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden => "FORBIDDEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::CustomerNotFound => "CUSTOMER_NOT_FOUND",
            Self::DeliveryPersonNotFound => "DELIVERY_PERSON_NOT_FOUND",
            Self::OrderNotFound => "ORDER_NOT_FOUND",
            Self::PizzaNotFound => "PIZZA_NOT_FOUND",
            Self::IngredientNotFound => "INGREDIENT_NOT_FOUND",
            Self::ExtraItemNotFound => "EXTRA_ITEM_NOT_FOUND",
            Self::DiscountCodeNotFound => "DISCOUNT_CODE_NOT_FOUND",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::PizzaAlreadyExists => "PIZZA_ALREADY_EXISTS",
            Self::IngredientAlreadyExists => "INGREDIENT_ALREADY_EXISTS",
            Self::DiscountCodeAlreadyExists => "DISCOUNT_CODE_ALREADY_EXISTS",
            Self::IngredientInUse => "INGREDIENT_IN_USE",
            Self::OrderNotAvailable => "ORDER_NOT_AVAILABLE",
            Self::OrderAlreadyAssigned => "ORDER_ALREADY_ASSIGNED",
            Self::DeliveryPersonUnavailable => "DELIVERY_PERSON_UNAVAILABLE",
            Self::DeliveryPersonBusy => "DELIVERY_PERSON_BUSY",
            Self::InvalidStatus => "INVALID_STATUS",
            Self::DiscountAlreadyUsed => "DISCOUNT_ALREADY_USED",
            Self::CannotDeleteAdmin => "CANNOT_DELETE_ADMIN",
            Self::EmptyCart => "EMPTY_CART",
            Self::InvalidQuantity => "INVALID_QUANTITY",
            Self::InvalidCategory => "INVALID_CATEGORY",
            Self::InvalidPercentage => "INVALID_PERCENTAGE",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::InvalidStatus
            | Self::OrderNotAvailable
            | Self::EmptyCart
            | Self::InvalidQuantity
            | Self::InvalidCategory
            | Self::InvalidPercentage => StatusCode::BAD_REQUEST,
            Self::Unauthorized | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UserNotFound
            | Self::CustomerNotFound
            | Self::DeliveryPersonNotFound
            | Self::OrderNotFound
            | Self::PizzaNotFound
            | Self::IngredientNotFound
            | Self::ExtraItemNotFound
            | Self::DiscountCodeNotFound => StatusCode::NOT_FOUND,
            Self::UsernameTaken
            | Self::PizzaAlreadyExists
            | Self::IngredientAlreadyExists
            | Self::DiscountCodeAlreadyExists
            | Self::IngredientInUse
            | Self::OrderAlreadyAssigned
            | Self::DeliveryPersonUnavailable
            | Self::DeliveryPersonBusy
            | Self::DiscountAlreadyUsed
            | Self::CannotDeleteAdmin => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ShopServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
