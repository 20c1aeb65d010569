//! Authorization decisions, invoked at the top of each service operation.

use uuid::Uuid;

use crate::auth::Claims;
use crate::enums::UserRole;
use crate::error::{ AppError, Result };

/// The authenticated caller of an operation.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl From<&Claims> for Actor {
    fn from(claims: &Claims) -> Self {
        Actor {
            user_id: claims.sub,
            role: claims.role,
        }
    }
}

pub fn require_role(actor: &Actor, role: UserRole) -> Result<()> {
    if actor.role == role {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!("This operation requires the {} role", role)))
    }
}

pub fn require_admin(actor: &Actor) -> Result<()> {
    require_role(actor, UserRole::Admin)
}

/// Ownership check: the actor must be the given owner.
pub fn require_owner(actor: &Actor, owner_id: Uuid, what: &'static str) -> Result<()> {
    if actor.user_id == owner_id {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!("You do not own this {}", what)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(role: UserRole) -> Actor {
        Actor { user_id: Uuid::new_v4(), role }
    }

    #[test]
    fn role_mismatch_is_forbidden() {
        let a = actor(UserRole::Creator);
        assert!(require_role(&a, UserRole::Creator).is_ok());
        assert!(matches!(require_role(&a, UserRole::Business), Err(AppError::Forbidden(_))));
    }

    #[test]
    fn ownership_is_enforced() {
        let a = actor(UserRole::Business);
        assert!(require_owner(&a, a.user_id, "campaign").is_ok());
        assert!(require_owner(&a, Uuid::new_v4(), "campaign").is_err());
    }
}
