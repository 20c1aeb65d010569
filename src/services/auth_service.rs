use std::sync::Arc;

use argon2::{ Argon2, PasswordHash, PasswordHasher, PasswordVerifier };
use argon2::password_hash::{ SaltString, rand_core::OsRng };
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth;
use crate::db::{ self, UserRepository };
use crate::db::entity::user;
use crate::enums::{ Currency, UserRole };
use crate::error::{ AppError, Result };
use crate::mail::MailClient;
use crate::validate;

pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub role: UserRole,
}

pub struct AuthService {
    db: DatabaseConnection,
    user_repo: Arc<UserRepository>,
    mail: Arc<MailClient>,
    jwt_secret: String,
    jwt_ttl_seconds: i64,
    frontend_base_url: String,
}

impl AuthService {
    pub fn new(
        db: DatabaseConnection,
        user_repo: Arc<UserRepository>,
        mail: Arc<MailClient>,
        jwt_secret: String,
        jwt_ttl_seconds: i64,
        frontend_base_url: String
    ) -> Self {
        Self {
            db,
            user_repo,
            mail,
            jwt_secret,
            jwt_ttl_seconds,
            frontend_base_url,
        }
    }

    /// Create the user, provision the default-currency account for the role
    /// and send the verification mail. Mail delivery is best effort.
    pub async fn register(&self, input: RegisterInput) -> Result<user::Model> {
        validate::require_email(&input.email)?;
        validate::require_password(&input.password)?;
        validate::require_non_empty(&input.display_name, "Display name")?;

        if input.role == UserRole::Admin {
            return Err(AppError::Forbidden("Cannot self-register as admin".to_string()));
        }

        let email = input.email.trim().to_lowercase();
        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::EmailTaken);
        }

        let password_hash = hash_password(&input.password)?;
        let verification_token = Uuid::new_v4().to_string();

        let created = self.user_repo.create(
            email,
            password_hash,
            input.display_name.trim().to_string(),
            input.role,
            verification_token.clone()
        ).await?;

        db::provision_account(&self.db, created.id, input.role, Currency::Usd).await?;

        let delivered = self.mail.send_verification(
            &created.email,
            &verification_token,
            &self.frontend_base_url
        ).await;
        if !delivered {
            tracing::warn!(user_id = %created.id, "Verification mail was not delivered");
        }

        Ok(created)
    }

    /// Verify credentials and issue a bearer token.
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, user::Model)> {
        let user = self.user_repo
            .find_by_email(email.trim().to_lowercase().as_str()).await?
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        let role: UserRole = user.role.parse()?;
        let token = auth::issue_token(
            user.id,
            role,
            &user.email,
            &self.jwt_secret,
            self.jwt_ttl_seconds
        )?;

        Ok((token, user))
    }

    pub async fn verify_email(&self, token: &str) -> Result<user::Model> {
        let user = self.user_repo
            .find_by_verification_token(token).await?
            .ok_or(AppError::NotFound("Verification token"))?;

        self.user_repo.mark_verified(user).await
    }

    /// Start a password reset. Responds identically whether or not the email
    /// exists, so account presence is not leaked.
    pub async fn forgot_password(&self, email: &str) -> Result<()> {
        let Some(user) = self.user_repo.find_by_email(
            email.trim().to_lowercase().as_str()
        ).await? else {
            tracing::debug!("Password reset requested for unknown email");
            return Ok(());
        };

        let token = Uuid::new_v4().to_string();
        let expires_at = chrono::Utc::now() + chrono::Duration::hours(1);
        let user = self.user_repo.set_reset_token(user, token.clone(), expires_at).await?;

        let delivered = self.mail.send_password_reset(
            &user.email,
            &token,
            &self.frontend_base_url
        ).await;
        if !delivered {
            tracing::warn!(user_id = %user.id, "Password reset mail was not delivered");
        }

        Ok(())
    }

    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<user::Model> {
        validate::require_password(new_password)?;

        let user = self.user_repo
            .find_by_reset_token(token).await?
            .ok_or(AppError::NotFound("Reset token"))?;

        let expired = user.reset_token_expires_at
            .map(|at| at < chrono::Utc::now())
            .unwrap_or(true);
        if expired {
            return Err(AppError::InvalidInput("Reset token has expired".to_string()));
        }

        let password_hash = hash_password(new_password)?;
        self.user_repo.update_password(user, password_hash).await
    }

    pub async fn me(&self, user_id: Uuid) -> Result<user::Model> {
        self.user_repo.find_by_id(user_id).await
    }
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?
        .to_string();

    Ok(hash)
}

fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e|
        AppError::Internal(format!("Invalid password hash: {}", e))
    )?;

    Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("hunter2-hunter2").unwrap();
        assert!(verify_password("hunter2-hunter2", &hash).unwrap());
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }
}
