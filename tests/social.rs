mod common;

use common::{ seed_user, setup_db };
use influo::enums::{ SocialPlatform, UserRole };
use influo::error::AppError;
use influo::policy::Actor;
use influo::services::SocialMediaService;
use influo::services::social_media_service::{ ConnectAccount, TokenRefresh };
use sea_orm::DatabaseConnection;

fn connect_input(platform: SocialPlatform, username: &str) -> ConnectAccount {
    ConnectAccount {
        platform,
        username: username.to_string(),
        access_token: "access-token".to_string(),
        refresh_token: Some("refresh-token".to_string()),
        token_expires_at: Some(chrono::Utc::now() + chrono::Duration::days(30)),
    }
}

async fn creator_with_service(db: &DatabaseConnection) -> (Actor, SocialMediaService) {
    let creator = seed_user(db, UserRole::Creator).await;
    (creator, SocialMediaService::new(db.clone()))
}

#[tokio::test]
async fn connect_upserts_per_platform() {
    let db = setup_db().await;
    let (creator, social) = creator_with_service(&db).await;

    let first = social
        .connect(&creator, connect_input(SocialPlatform::Tiktok, "old_handle")).await
        .unwrap();
    let second = social
        .connect(&creator, connect_input(SocialPlatform::Tiktok, "new_handle")).await
        .unwrap();

    // Same row, refreshed in place.
    assert_eq!(first.id, second.id);
    assert_eq!(second.username, "new_handle");
    assert!(second.is_connected);

    let accounts = social.list(&creator).await.unwrap();
    assert_eq!(accounts.len(), 1);
}

#[tokio::test]
async fn platforms_are_independent_rows() {
    let db = setup_db().await;
    let (creator, social) = creator_with_service(&db).await;

    social.connect(&creator, connect_input(SocialPlatform::Tiktok, "handle")).await.unwrap();
    social.connect(&creator, connect_input(SocialPlatform::Instagram, "handle")).await.unwrap();

    let accounts = social.list(&creator).await.unwrap();
    assert_eq!(accounts.len(), 2);
}

#[tokio::test]
async fn disconnect_clears_credentials_but_keeps_the_row() {
    let db = setup_db().await;
    let (creator, social) = creator_with_service(&db).await;

    let connected = social
        .connect(&creator, connect_input(SocialPlatform::Youtube, "channel")).await
        .unwrap();
    social.sync(&creator, SocialPlatform::Youtube, 5000).await.unwrap();

    let disconnected = social.disconnect(&creator, SocialPlatform::Youtube).await.unwrap();
    assert_eq!(disconnected.id, connected.id);
    assert!(!disconnected.is_connected);
    assert!(disconnected.access_token.is_none());
    assert!(disconnected.refresh_token.is_none());
    assert_eq!(disconnected.follower_count, 5000);

    // Reconnecting restores the same row.
    let reconnected = social
        .connect(&creator, connect_input(SocialPlatform::Youtube, "channel")).await
        .unwrap();
    assert_eq!(reconnected.id, connected.id);
    assert!(reconnected.is_connected);
}

#[tokio::test]
async fn sync_requires_a_connected_account() {
    let db = setup_db().await;
    let (creator, social) = creator_with_service(&db).await;

    social.connect(&creator, connect_input(SocialPlatform::Twitter, "bird")).await.unwrap();
    social.disconnect(&creator, SocialPlatform::Twitter).await.unwrap();

    let result = social.sync(&creator, SocialPlatform::Twitter, 100).await;
    assert!(matches!(result, Err(AppError::InvalidStateTransition(_))));
}

#[tokio::test]
async fn refresh_swaps_credentials_without_touching_connection_state() {
    let db = setup_db().await;
    let (creator, social) = creator_with_service(&db).await;

    social.connect(&creator, connect_input(SocialPlatform::Instagram, "pics")).await.unwrap();

    let refreshed = social
        .refresh_token(&creator, SocialPlatform::Instagram, TokenRefresh {
            access_token: "fresh-access".to_string(),
            refresh_token: None,
            token_expires_at: Some(chrono::Utc::now() + chrono::Duration::days(60)),
        }).await
        .unwrap();

    assert_eq!(refreshed.access_token.as_deref(), Some("fresh-access"));
    // The stored refresh token survives when the refresh omits one.
    assert_eq!(refreshed.refresh_token.as_deref(), Some("refresh-token"));
    assert!(refreshed.is_connected);
}

#[tokio::test]
async fn expiring_tokens_report_is_admin_only() {
    let db = setup_db().await;
    let (creator, social) = creator_with_service(&db).await;
    let admin = seed_user(&db, UserRole::Admin).await;

    let mut soon = connect_input(SocialPlatform::Tiktok, "handle");
    soon.token_expires_at = Some(chrono::Utc::now() + chrono::Duration::days(2));
    social.connect(&creator, soon).await.unwrap();

    let mut later = connect_input(SocialPlatform::Youtube, "channel");
    later.token_expires_at = Some(chrono::Utc::now() + chrono::Duration::days(90));
    social.connect(&creator, later).await.unwrap();

    let result = social.expiring_tokens(&creator, 7).await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));

    let expiring = social.expiring_tokens(&admin, 7).await.unwrap();
    assert_eq!(expiring.len(), 1);
    assert_eq!(expiring[0].platform, SocialPlatform::Tiktok.as_str());
}

#[tokio::test]
async fn social_accounts_are_a_creator_feature() {
    let db = setup_db().await;
    let business = seed_user(&db, UserRole::Business).await;
    let social = SocialMediaService::new(db.clone());

    let result = social.connect(&business, connect_input(SocialPlatform::Tiktok, "brand")).await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));
}
