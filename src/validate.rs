//! Explicit request-validation helpers, run before any business logic.

use sea_orm::prelude::Decimal;

use crate::error::{ AppError, Result };

pub fn require_email(value: &str) -> Result<()> {
    let trimmed = value.trim();
    let valid =
        trimmed.len() >= 3 &&
        trimmed.len() <= 254 &&
        trimmed.split('@').count() == 2 &&
        !trimmed.starts_with('@') &&
        !trimmed.ends_with('@');

    if valid {
        Ok(())
    } else {
        Err(AppError::Validation("A valid email address is required".to_string()))
    }
}

pub fn require_password(value: &str) -> Result<()> {
    if value.len() < 8 {
        return Err(AppError::Validation("Password must be at least 8 characters".to_string()));
    }
    if value.len() > 128 {
        return Err(AppError::Validation("Password must be at most 128 characters".to_string()));
    }
    Ok(())
}

pub fn require_non_empty(value: &str, label: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(AppError::Validation(format!("{} must not be empty", label)))
    } else {
        Ok(())
    }
}

pub fn require_max_len(value: &str, max: usize, label: &str) -> Result<()> {
    if value.len() > max {
        Err(AppError::Validation(format!("{} must be at most {} characters", label, max)))
    } else {
        Ok(())
    }
}

/// Monetary amounts must be strictly positive; sign is assigned by the ledger.
pub fn require_positive_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        Err(AppError::Validation("Amount must be greater than zero".to_string()))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(require_email("a@b.co").is_ok());
        assert!(require_email("not-an-email").is_err());
        assert!(require_email("@b.co").is_err());
        assert!(require_email("a@").is_err());
        assert!(require_email("a@b@c").is_err());
    }

    #[test]
    fn password_bounds() {
        assert!(require_password("short").is_err());
        assert!(require_password("long-enough-password").is_ok());
    }

    #[test]
    fn amounts_must_be_positive() {
        assert!(require_positive_amount(Decimal::new(100, 2)).is_ok());
        assert!(require_positive_amount(Decimal::ZERO).is_err());
        assert!(require_positive_amount(Decimal::new(-1, 0)).is_err());
    }
}
