use sea_orm::{ entity::prelude::*, DatabaseConnection, Set };
use uuid::Uuid;

use crate::enums::{ Currency, UserRole };
use crate::error::{ AppError, Result };

pub mod entity;
pub use entity::*;

mod account_repository;
pub use account_repository::AccountRepository;

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        email: String,
        password_hash: String,
        display_name: String,
        role: UserRole,
        verification_token: String
    ) -> Result<entity::user::Model> {
        let now = chrono::Utc::now();
        let user = entity::user::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email),
            password_hash: Set(password_hash),
            display_name: Set(display_name),
            role: Set(role.as_str().to_string()),
            email_verified: Set(false),
            verification_token: Set(Some(verification_token)),
            reset_token: Set(None),
            reset_token_expires_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let user = user.insert(&self.db).await?;
        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<entity::user::Model> {
        entity::user::Entity
            ::find_by_id(id)
            .one(&self.db).await?
            .ok_or(AppError::NotFound("User"))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<entity::user::Model>> {
        let user = entity::user::Entity
            ::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(&self.db).await?;

        Ok(user)
    }

    pub async fn find_by_verification_token(
        &self,
        token: &str
    ) -> Result<Option<entity::user::Model>> {
        let user = entity::user::Entity
            ::find()
            .filter(entity::user::Column::VerificationToken.eq(token))
            .one(&self.db).await?;

        Ok(user)
    }

    pub async fn find_by_reset_token(&self, token: &str) -> Result<Option<entity::user::Model>> {
        let user = entity::user::Entity
            ::find()
            .filter(entity::user::Column::ResetToken.eq(token))
            .one(&self.db).await?;

        Ok(user)
    }

    pub async fn mark_verified(&self, user: entity::user::Model) -> Result<entity::user::Model> {
        let mut active: entity::user::ActiveModel = user.into();
        active.email_verified = Set(true);
        active.verification_token = Set(None);
        active.updated_at = Set(chrono::Utc::now());

        let user = active.update(&self.db).await?;
        Ok(user)
    }

    pub async fn set_reset_token(
        &self,
        user: entity::user::Model,
        token: String,
        expires_at: chrono::DateTime<chrono::Utc>
    ) -> Result<entity::user::Model> {
        let mut active: entity::user::ActiveModel = user.into();
        active.reset_token = Set(Some(token));
        active.reset_token_expires_at = Set(Some(expires_at));
        active.updated_at = Set(chrono::Utc::now());

        let user = active.update(&self.db).await?;
        Ok(user)
    }

    pub async fn update_password(
        &self,
        user: entity::user::Model,
        password_hash: String
    ) -> Result<entity::user::Model> {
        let mut active: entity::user::ActiveModel = user.into();
        active.password_hash = Set(password_hash);
        active.reset_token = Set(None);
        active.reset_token_expires_at = Set(None);
        active.updated_at = Set(chrono::Utc::now());

        let user = active.update(&self.db).await?;
        Ok(user)
    }
}

/// Provision the default account row for a freshly registered user.
pub async fn provision_account(
    db: &DatabaseConnection,
    user_id: Uuid,
    role: UserRole,
    currency: Currency
) -> Result<()> {
    let now = chrono::Utc::now();
    match role {
        UserRole::Business => {
            let account = entity::business_account::ActiveModel {
                id: Set(Uuid::new_v4()),
                user_id: Set(user_id),
                currency: Set(currency.as_str().to_string()),
                balance: Set(Decimal::ZERO),
                created_at: Set(now),
                updated_at: Set(now),
            };
            account.insert(db).await?;
        }
        UserRole::Creator => {
            let account = entity::creator_account::ActiveModel {
                id: Set(Uuid::new_v4()),
                user_id: Set(user_id),
                currency: Set(currency.as_str().to_string()),
                available_balance: Set(Decimal::ZERO),
                created_at: Set(now),
                updated_at: Set(now),
            };
            account.insert(db).await?;
        }
        UserRole::Admin => {}
    }

    Ok(())
}
