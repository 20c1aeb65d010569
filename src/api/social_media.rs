use axum::{ Extension, Json, extract::{ Path, Query, State }, http::StatusCode };
use serde::{ Deserialize, Serialize };
use uuid::Uuid;

use crate::auth::Claims;
use crate::db::entity::social_account;
use crate::enums::SocialPlatform;
use crate::error::Result;
use crate::policy::Actor;
use crate::services::social_media_service::{ ConnectAccount, PlatformAnalytics, TokenRefresh };

use super::AppState;

#[derive(Deserialize)]
pub struct ConnectRequest {
    pub platform: SocialPlatform,
    pub username: String,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub token_expires_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Deserialize)]
pub struct RefreshTokenRequest {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub token_expires_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Deserialize)]
pub struct SyncRequest {
    pub follower_count: i64,
}

#[derive(Deserialize)]
pub struct ExpiringTokensQuery {
    pub within_days: Option<i64>,
}

#[derive(Serialize)]
pub struct SocialAccountResponse {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub platform: String,
    pub username: String,
    pub is_connected: bool,
    pub follower_count: i64,
    pub token_expires_at: Option<String>,
    pub last_synced: Option<String>,
    pub created_at: String,
}

impl From<social_account::Model> for SocialAccountResponse {
    fn from(a: social_account::Model) -> Self {
        Self {
            id: a.id,
            creator_id: a.creator_id,
            platform: a.platform,
            username: a.username,
            is_connected: a.is_connected,
            follower_count: a.follower_count,
            token_expires_at: a.token_expires_at.map(|t| t.to_rfc3339()),
            last_synced: a.last_synced.map(|t| t.to_rfc3339()),
            created_at: a.created_at.to_rfc3339(),
        }
    }
}

pub async fn connect(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<ConnectRequest>
) -> Result<(StatusCode, Json<SocialAccountResponse>)> {
    let actor = Actor::from(&claims);
    let account = state.social_media_service.connect(&actor, ConnectAccount {
        platform: request.platform,
        username: request.username,
        access_token: request.access_token,
        refresh_token: request.refresh_token,
        token_expires_at: request.token_expires_at,
    }).await?;

    Ok((StatusCode::CREATED, Json(account.into())))
}

pub async fn list(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>
) -> Result<Json<Vec<SocialAccountResponse>>> {
    let actor = Actor::from(&claims);
    let accounts = state.social_media_service.list(&actor).await?;
    Ok(Json(accounts.into_iter().map(Into::into).collect()))
}

pub async fn disconnect(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(platform): Path<String>
) -> Result<Json<SocialAccountResponse>> {
    let actor = Actor::from(&claims);
    let platform: SocialPlatform = platform.parse()?;
    let account = state.social_media_service.disconnect(&actor, platform).await?;
    Ok(Json(account.into()))
}

pub async fn refresh_token(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(platform): Path<String>,
    Json(request): Json<RefreshTokenRequest>
) -> Result<Json<SocialAccountResponse>> {
    let actor = Actor::from(&claims);
    let platform: SocialPlatform = platform.parse()?;
    let account = state.social_media_service.refresh_token(&actor, platform, TokenRefresh {
        access_token: request.access_token,
        refresh_token: request.refresh_token,
        token_expires_at: request.token_expires_at,
    }).await?;

    Ok(Json(account.into()))
}

pub async fn sync(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(platform): Path<String>,
    Json(request): Json<SyncRequest>
) -> Result<Json<SocialAccountResponse>> {
    let actor = Actor::from(&claims);
    let platform: SocialPlatform = platform.parse()?;
    let account = state.social_media_service.sync(&actor, platform, request.follower_count).await?;
    Ok(Json(account.into()))
}

pub async fn analytics(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>
) -> Result<Json<Vec<PlatformAnalytics>>> {
    let actor = Actor::from(&claims);
    let analytics = state.social_media_service.analytics(&actor).await?;
    Ok(Json(analytics))
}

pub async fn expiring_tokens(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<ExpiringTokensQuery>
) -> Result<Json<Vec<SocialAccountResponse>>> {
    let actor = Actor::from(&claims);
    let accounts = state.social_media_service.expiring_tokens(
        &actor,
        params.within_days.unwrap_or(7)
    ).await?;

    Ok(Json(accounts.into_iter().map(Into::into).collect()))
}
