#![allow(dead_code)]

use sea_orm::{ ActiveModelTrait, Database, DatabaseConnection, Set, prelude::Decimal };
use uuid::Uuid;

use influo::db::{ self, entity::user };
use influo::enums::{ CampaignStatus, Currency, ParticipationStatus, UserRole };
use influo::policy::Actor;
use influo::services::{ CampaignService, LedgerService };
use influo::services::campaign_service::{ CampaignUpdate, NewCampaign };
use migration::MigratorTrait;

pub async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    db
}

pub fn dec(value: &str) -> Decimal {
    value.parse().unwrap()
}

/// Insert a user row directly and provision the USD account for the role,
/// skipping the registration flow.
pub async fn seed_user(db: &DatabaseConnection, role: UserRole) -> Actor {
    let id = Uuid::new_v4();
    let now = chrono::Utc::now();
    let model = user::ActiveModel {
        id: Set(id),
        email: Set(format!("{}-{}@example.com", role, id.simple())),
        password_hash: Set("not-a-real-hash".to_string()),
        display_name: Set(format!("{} user", role)),
        role: Set(role.as_str().to_string()),
        email_verified: Set(true),
        verification_token: Set(None),
        reset_token: Set(None),
        reset_token_expires_at: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };
    model.insert(db).await.unwrap();

    db::provision_account(db, id, role, Currency::Usd).await.unwrap();

    Actor { user_id: id, role }
}

/// A business with a funded USD balance.
pub async fn funded_business(db: &DatabaseConnection, amount: &str) -> Actor {
    let business = seed_user(db, UserRole::Business).await;
    let ledger = LedgerService::new(db.clone());
    ledger.deposit(&business, dec(amount), Currency::Usd).await.unwrap();
    business
}

/// Create a campaign for the business and move it to active.
pub async fn active_campaign(
    db: &DatabaseConnection,
    business: &Actor,
    budget: &str
) -> influo::db::entity::campaign::Model {
    let campaigns = CampaignService::new(db.clone());
    let campaign = campaigns
        .create_campaign(business, NewCampaign {
            title: "Spring launch".to_string(),
            description: "Product launch push".to_string(),
            budget: dec(budget),
            currency: Currency::Usd,
            starts_at: None,
            ends_at: None,
        }).await
        .unwrap();

    campaigns
        .update_campaign(business, campaign.id, CampaignUpdate {
            status: Some(CampaignStatus::Active),
            ..Default::default()
        }).await
        .unwrap()
}

/// Seed a creator, apply to the campaign and approve the application.
pub async fn approved_creator(
    db: &DatabaseConnection,
    business: &Actor,
    campaign_id: Uuid
) -> Actor {
    let creator = seed_user(db, UserRole::Creator).await;
    let campaigns = CampaignService::new(db.clone());

    let participation = campaigns.apply(&creator, campaign_id, None).await.unwrap();
    campaigns
        .review_participation(
            business,
            campaign_id,
            participation.id,
            ParticipationStatus::Approved
        ).await
        .unwrap();

    creator
}
