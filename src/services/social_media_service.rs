use sea_orm::{
    ActiveModelTrait,
    ColumnTrait,
    DatabaseConnection,
    EntityTrait,
    QueryFilter,
    QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::db::entity::social_account;
use crate::enums::{ SocialPlatform, UserRole };
use crate::error::{ AppError, Result };
use crate::policy::{ self, Actor };
use crate::validate;

pub struct ConnectAccount {
    pub platform: SocialPlatform,
    pub username: String,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub token_expires_at: Option<chrono::DateTime<chrono::Utc>>,
}

pub struct TokenRefresh {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub token_expires_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct PlatformAnalytics {
    pub platform: String,
    pub username: String,
    pub follower_count: i64,
    pub is_connected: bool,
    pub last_synced: Option<chrono::DateTime<chrono::Utc>>,
}

/// Linked social accounts, keyed by (creator, platform). Connect is an
/// upsert; disconnect clears credentials but keeps the row.
pub struct SocialMediaService {
    db: DatabaseConnection,
}

impl SocialMediaService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn connect(
        &self,
        actor: &Actor,
        input: ConnectAccount
    ) -> Result<social_account::Model> {
        policy::require_role(actor, UserRole::Creator)?;
        validate::require_non_empty(&input.username, "Username")?;
        validate::require_non_empty(&input.access_token, "Access token")?;

        let now = chrono::Utc::now();
        let existing = self.find(actor.user_id, input.platform).await?;

        let model = match existing {
            Some(row) => {
                let mut active: social_account::ActiveModel = row.into();
                active.username = Set(input.username);
                active.access_token = Set(Some(input.access_token));
                active.refresh_token = Set(input.refresh_token);
                active.token_expires_at = Set(input.token_expires_at);
                active.is_connected = Set(true);
                active.last_synced = Set(Some(now));
                active.updated_at = Set(now);
                active.update(&self.db).await?
            }
            None => {
                let active = social_account::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    creator_id: Set(actor.user_id),
                    platform: Set(input.platform.as_str().to_string()),
                    username: Set(input.username),
                    access_token: Set(Some(input.access_token)),
                    refresh_token: Set(input.refresh_token),
                    token_expires_at: Set(input.token_expires_at),
                    is_connected: Set(true),
                    follower_count: Set(0),
                    last_synced: Set(Some(now)),
                    created_at: Set(now),
                    updated_at: Set(now),
                };
                active.insert(&self.db).await?
            }
        };

        Ok(model)
    }

    pub async fn list(&self, actor: &Actor) -> Result<Vec<social_account::Model>> {
        policy::require_role(actor, UserRole::Creator)?;

        let accounts = social_account::Entity
            ::find()
            .filter(social_account::Column::CreatorId.eq(actor.user_id))
            .order_by_asc(social_account::Column::Platform)
            .all(&self.db).await?;

        Ok(accounts)
    }

    /// Clear credentials and flip the connection flag; the row survives so a
    /// later connect restores it in place.
    pub async fn disconnect(
        &self,
        actor: &Actor,
        platform: SocialPlatform
    ) -> Result<social_account::Model> {
        policy::require_role(actor, UserRole::Creator)?;

        let row = self
            .find(actor.user_id, platform).await?
            .ok_or(AppError::NotFound("Social account"))?;

        let mut active: social_account::ActiveModel = row.into();
        active.access_token = Set(None);
        active.refresh_token = Set(None);
        active.token_expires_at = Set(None);
        active.is_connected = Set(false);
        active.updated_at = Set(chrono::Utc::now());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Swap credentials without touching the connection state.
    pub async fn refresh_token(
        &self,
        actor: &Actor,
        platform: SocialPlatform,
        input: TokenRefresh
    ) -> Result<social_account::Model> {
        policy::require_role(actor, UserRole::Creator)?;
        validate::require_non_empty(&input.access_token, "Access token")?;

        let row = self
            .find(actor.user_id, platform).await?
            .ok_or(AppError::NotFound("Social account"))?;

        let mut active: social_account::ActiveModel = row.into();
        active.access_token = Set(Some(input.access_token));
        if input.refresh_token.is_some() {
            active.refresh_token = Set(input.refresh_token);
        }
        active.token_expires_at = Set(input.token_expires_at);
        active.updated_at = Set(chrono::Utc::now());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Refresh follower statistics from the platform. The platform fetch is
    /// an external collaborator; the reported count is persisted here.
    pub async fn sync(
        &self,
        actor: &Actor,
        platform: SocialPlatform,
        follower_count: i64
    ) -> Result<social_account::Model> {
        policy::require_role(actor, UserRole::Creator)?;

        if follower_count < 0 {
            return Err(AppError::Validation("Follower count must not be negative".to_string()));
        }

        let row = self
            .find(actor.user_id, platform).await?
            .ok_or(AppError::NotFound("Social account"))?;

        if !row.is_connected {
            return Err(
                AppError::InvalidStateTransition("Account is not connected".to_string())
            );
        }

        let now = chrono::Utc::now();
        let mut active: social_account::ActiveModel = row.into();
        active.follower_count = Set(follower_count);
        active.last_synced = Set(Some(now));
        active.updated_at = Set(now);

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    pub async fn analytics(&self, actor: &Actor) -> Result<Vec<PlatformAnalytics>> {
        let accounts = self.list(actor).await?;

        Ok(
            accounts
                .into_iter()
                .map(|a| PlatformAnalytics {
                    platform: a.platform,
                    username: a.username,
                    follower_count: a.follower_count,
                    is_connected: a.is_connected,
                    last_synced: a.last_synced,
                })
                .collect()
        )
    }

    /// Admin view of accounts whose tokens expire within the window.
    pub async fn expiring_tokens(
        &self,
        actor: &Actor,
        within_days: i64
    ) -> Result<Vec<social_account::Model>> {
        policy::require_admin(actor)?;

        let cutoff = chrono::Utc::now() + chrono::Duration::days(within_days);

        let accounts = social_account::Entity
            ::find()
            .filter(social_account::Column::IsConnected.eq(true))
            .filter(social_account::Column::TokenExpiresAt.is_not_null())
            .filter(social_account::Column::TokenExpiresAt.lte(cutoff))
            .order_by_asc(social_account::Column::TokenExpiresAt)
            .all(&self.db).await?;

        Ok(accounts)
    }

    async fn find(
        &self,
        creator_id: Uuid,
        platform: SocialPlatform
    ) -> Result<Option<social_account::Model>> {
        let row = social_account::Entity
            ::find()
            .filter(social_account::Column::CreatorId.eq(creator_id))
            .filter(social_account::Column::Platform.eq(platform.as_str()))
            .one(&self.db).await?;

        Ok(row)
    }
}
