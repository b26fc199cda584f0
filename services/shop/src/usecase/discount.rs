use chrono::NaiveDate;
use tracing::info;

use pizzeria_domain::birthday::is_birthday;
use pizzeria_domain::order::BIRTHDAY_CODE;

use crate::domain::repository::{DiscountCodeRepository, UserRepository};
use crate::domain::types::{
    DiscountCode, MAX_DISCOUNT_CODE_LEN, NewDiscountCode, User, validate_text,
};
use crate::error::ShopServiceError;

fn check_percentage(discount_percentage: i32) -> Result<(), ShopServiceError> {
    if !(1..=100).contains(&discount_percentage) {
        return Err(ShopServiceError::InvalidPercentage);
    }
    Ok(())
}

// ── Admin CRUD ───────────────────────────────────────────────────────────────

pub struct ListDiscountCodesUseCase<R: DiscountCodeRepository> {
    pub repo: R,
}

impl<R: DiscountCodeRepository> ListDiscountCodesUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<DiscountCode>, ShopServiceError> {
        self.repo.list().await
    }
}

pub struct CreateDiscountCodeInput {
    pub code: String,
    pub discount_percentage: i32,
}

pub struct CreateDiscountCodeUseCase<R: DiscountCodeRepository> {
    pub repo: R,
}

impl<R: DiscountCodeRepository> CreateDiscountCodeUseCase<R> {
    /// New codes start active.
    pub async fn execute(
        &self,
        input: CreateDiscountCodeInput,
    ) -> Result<DiscountCode, ShopServiceError> {
        let code = input.code.trim().to_owned();
        validate_text("code", &code, MAX_DISCOUNT_CODE_LEN)?;
        check_percentage(input.discount_percentage)?;
        let created = self
            .repo
            .create(&NewDiscountCode {
                code,
                discount_percentage: input.discount_percentage,
                is_active: true,
            })
            .await?;
        info!(code = %created.code, percentage = created.discount_percentage, "discount code created");
        Ok(created)
    }
}

pub struct UpdateDiscountCodeUseCase<R: DiscountCodeRepository> {
    pub repo: R,
}

impl<R: DiscountCodeRepository> UpdateDiscountCodeUseCase<R> {
    pub async fn execute(
        &self,
        id: i32,
        discount_percentage: i32,
        is_active: bool,
    ) -> Result<(), ShopServiceError> {
        check_percentage(discount_percentage)?;
        self.repo.update(id, discount_percentage, is_active).await?;
        info!(discount_code_id = id, discount_percentage, is_active, "discount code updated");
        Ok(())
    }
}

pub struct DeleteDiscountCodeUseCase<R: DiscountCodeRepository> {
    pub repo: R,
}

impl<R: DiscountCodeRepository> DeleteDiscountCodeUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<(), ShopServiceError> {
        self.repo.delete(id).await?;
        info!(discount_code_id = id, "discount code deleted");
        Ok(())
    }
}

// ── ValidateDiscountCode ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountValidation {
    pub valid: bool,
    pub message: &'static str,
    pub discount_percentage: Option<i32>,
    pub is_birthday: bool,
}

impl DiscountValidation {
    fn rejected(message: &'static str) -> Self {
        Self {
            valid: false,
            message,
            discount_percentage: None,
            is_birthday: false,
        }
    }
}

pub struct ValidateDiscountCodeUseCase<R: DiscountCodeRepository> {
    pub repo: R,
}

impl<R: DiscountCodeRepository> ValidateDiscountCodeUseCase<R> {
    /// Preview whether `code` would be accepted for `user`'s next order.
    pub async fn execute(
        &self,
        user: &User,
        code: &str,
    ) -> Result<DiscountValidation, ShopServiceError> {
        let code = match self.repo.find_by_code(code.trim()).await? {
            Some(code) if code.is_active => code,
            _ => return Ok(DiscountValidation::rejected("Invalid or inactive discount code")),
        };
        if self.repo.is_used_by(user.id, code.id).await? {
            return Ok(DiscountValidation::rejected(
                "You have already used this discount code",
            ));
        }
        let is_birthday = code.is_birthday();
        Ok(DiscountValidation {
            valid: true,
            message: if is_birthday {
                "Birthday special: free cheapest pizza and a free drink"
            } else {
                "Discount code applied"
            },
            discount_percentage: Some(code.discount_percentage),
            is_birthday,
        })
    }
}

// ── CheckBirthday ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthdayStatus {
    pub is_birthday: bool,
    pub already_used: bool,
    /// Birthday today, the promotion code is active, and the customer has not redeemed it.
    pub eligible: bool,
}

pub struct CheckBirthdayUseCase<U: UserRepository, D: DiscountCodeRepository> {
    pub users: U,
    pub codes: D,
}

impl<U: UserRepository, D: DiscountCodeRepository> CheckBirthdayUseCase<U, D> {
    pub async fn execute(&self, user: &User, today: NaiveDate) -> Result<BirthdayStatus, ShopServiceError> {
        let customer = self
            .users
            .find_customer_by_user_id(user.id)
            .await?
            .ok_or(ShopServiceError::CustomerNotFound)?;
        let birthday = customer
            .birth_date
            .is_some_and(|birth| is_birthday(birth, today));
        if !birthday {
            return Ok(BirthdayStatus {
                is_birthday: false,
                already_used: false,
                eligible: false,
            });
        }
        let (active, already_used) = match self.codes.find_by_code(BIRTHDAY_CODE).await? {
            Some(code) => (code.is_active, self.codes.is_used_by(user.id, code.id).await?),
            None => (false, false),
        };
        Ok(BirthdayStatus {
            is_birthday: true,
            already_used,
            eligible: active && !already_used,
        })
    }
}
