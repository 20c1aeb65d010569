mod common;

use std::sync::Arc;

use common::setup_db;
use influo::auth::decode_token;
use influo::config::MailConfig;
use influo::db::{ UserRepository, entity::user };
use influo::enums::UserRole;
use influo::error::AppError;
use influo::mail::MailClient;
use influo::policy::Actor;
use influo::services::{ AuthService, LedgerService };
use influo::services::auth_service::RegisterInput;
use sea_orm::{ DatabaseConnection, EntityTrait };

const JWT_SECRET: &str = "test-secret-test-secret";

fn auth_service(db: &DatabaseConnection) -> AuthService {
    let mail = MailClient::new(&MailConfig {
        relay_url: None,
        api_key: String::new(),
        from_address: "no-reply@influo.local".to_string(),
        from_name: "Influo".to_string(),
    });

    AuthService::new(
        db.clone(),
        Arc::new(UserRepository::new(db.clone())),
        Arc::new(mail),
        JWT_SECRET.to_string(),
        3600,
        "http://localhost:3000".to_string()
    )
}

fn register_input(email: &str, role: UserRole) -> RegisterInput {
    RegisterInput {
        email: email.to_string(),
        password: "correct-horse-battery".to_string(),
        display_name: "Test User".to_string(),
        role,
    }
}

#[tokio::test]
async fn register_and_login_round_trip() {
    let db = setup_db().await;
    let auth = auth_service(&db);

    let created = auth.register(register_input("Alice@Example.COM", UserRole::Business)).await.unwrap();
    assert_eq!(created.email, "alice@example.com");
    assert!(!created.email_verified);

    let (token, user) = auth.login("alice@example.com", "correct-horse-battery").await.unwrap();
    assert_eq!(user.id, created.id);

    let claims = decode_token(&token, JWT_SECRET).unwrap();
    assert_eq!(claims.sub, created.id);
    assert_eq!(claims.role, UserRole::Business);
}

#[tokio::test]
async fn registration_provisions_a_zero_balance_account() {
    let db = setup_db().await;
    let auth = auth_service(&db);

    let created = auth.register(register_input("brand@example.com", UserRole::Business)).await.unwrap();

    let ledger = LedgerService::new(db.clone());
    let actor = Actor { user_id: created.id, role: UserRole::Business };
    let balances = ledger.balances(&actor).await.unwrap();
    assert_eq!(balances.len(), 1);
    assert_eq!(balances[0].currency, "USD");
    assert_eq!(balances[0].amount, common::dec("0"));
}

#[tokio::test]
async fn duplicate_emails_are_rejected() {
    let db = setup_db().await;
    let auth = auth_service(&db);

    auth.register(register_input("taken@example.com", UserRole::Creator)).await.unwrap();
    let result = auth.register(register_input("TAKEN@example.com", UserRole::Creator)).await;
    assert!(matches!(result, Err(AppError::EmailTaken)));
}

#[tokio::test]
async fn admin_self_registration_is_forbidden() {
    let db = setup_db().await;
    let auth = auth_service(&db);

    let result = auth.register(register_input("root@example.com", UserRole::Admin)).await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn short_passwords_are_rejected() {
    let db = setup_db().await;
    let auth = auth_service(&db);

    let mut input = register_input("weak@example.com", UserRole::Creator);
    input.password = "short".to_string();
    assert!(matches!(auth.register(input).await, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn wrong_credentials_are_unauthorized() {
    let db = setup_db().await;
    let auth = auth_service(&db);

    auth.register(register_input("carol@example.com", UserRole::Creator)).await.unwrap();

    let wrong_password = auth.login("carol@example.com", "not-the-password").await;
    assert!(matches!(wrong_password, Err(AppError::Unauthorized(_))));

    let unknown_user = auth.login("nobody@example.com", "correct-horse-battery").await;
    assert!(matches!(unknown_user, Err(AppError::Unauthorized(_))));
}

#[tokio::test]
async fn email_verification_consumes_the_token() {
    let db = setup_db().await;
    let auth = auth_service(&db);

    let created = auth.register(register_input("dave@example.com", UserRole::Creator)).await.unwrap();
    let token = user::Entity
        ::find_by_id(created.id)
        .one(&db).await
        .unwrap()
        .unwrap()
        .verification_token
        .unwrap();

    let verified = auth.verify_email(&token).await.unwrap();
    assert!(verified.email_verified);
    assert!(verified.verification_token.is_none());

    let again = auth.verify_email(&token).await;
    assert!(matches!(again, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn password_reset_flow() {
    let db = setup_db().await;
    let auth = auth_service(&db);

    let created = auth.register(register_input("erin@example.com", UserRole::Creator)).await.unwrap();

    // Unknown emails get the same answer as known ones.
    auth.forgot_password("stranger@example.com").await.unwrap();

    auth.forgot_password("erin@example.com").await.unwrap();
    let token = user::Entity
        ::find_by_id(created.id)
        .one(&db).await
        .unwrap()
        .unwrap()
        .reset_token
        .unwrap();

    auth.reset_password(&token, "a-brand-new-password").await.unwrap();

    assert!(auth.login("erin@example.com", "correct-horse-battery").await.is_err());
    auth.login("erin@example.com", "a-brand-new-password").await.unwrap();

    // The token is single use.
    let again = auth.reset_password(&token, "another-password").await;
    assert!(matches!(again, Err(AppError::NotFound(_))));
}
