mod common;

use common::{ active_campaign, approved_creator, dec, funded_business, seed_user, setup_db };
use influo::enums::{ CampaignStatus, Currency, ParticipationStatus, UserRole };
use influo::error::AppError;
use influo::services::CampaignService;
use influo::services::campaign_service::{ CampaignUpdate, NewCampaign };

fn draft_input(budget: &str) -> NewCampaign {
    NewCampaign {
        title: "Summer push".to_string(),
        description: "Seasonal awareness campaign".to_string(),
        budget: dec(budget),
        currency: Currency::Usd,
        starts_at: None,
        ends_at: None,
    }
}

#[tokio::test]
async fn campaigns_start_as_drafts_with_a_zeroed_tracker() {
    let db = setup_db().await;
    let business = seed_user(&db, UserRole::Business).await;
    let campaigns = CampaignService::new(db.clone());

    let campaign = campaigns.create_campaign(&business, draft_input("300")).await.unwrap();
    assert_eq!(campaign.status, CampaignStatus::Draft.as_str());

    let tracking = campaigns.budget_tracking(&business, campaign.id).await.unwrap();
    assert_eq!(tracking.total_budget, dec("300"));
    assert_eq!(tracking.spent_amount, dec("0"));
}

#[tokio::test]
async fn only_businesses_create_campaigns() {
    let db = setup_db().await;
    let creator = seed_user(&db, UserRole::Creator).await;
    let campaigns = CampaignService::new(db.clone());

    let result = campaigns.create_campaign(&creator, draft_input("300")).await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn status_transitions_follow_the_lifecycle() {
    let db = setup_db().await;
    let business = seed_user(&db, UserRole::Business).await;
    let campaigns = CampaignService::new(db.clone());
    let campaign = campaigns.create_campaign(&business, draft_input("300")).await.unwrap();

    // draft -> paused is not a legal move
    let result = campaigns.update_campaign(&business, campaign.id, CampaignUpdate {
        status: Some(CampaignStatus::Paused),
        ..Default::default()
    }).await;
    assert!(matches!(result, Err(AppError::InvalidStateTransition(_))));

    let active = campaigns
        .update_campaign(&business, campaign.id, CampaignUpdate {
            status: Some(CampaignStatus::Active),
            ..Default::default()
        }).await
        .unwrap();
    assert_eq!(active.status, CampaignStatus::Active.as_str());

    let completed = campaigns
        .update_campaign(&business, campaign.id, CampaignUpdate {
            status: Some(CampaignStatus::Completed),
            ..Default::default()
        }).await
        .unwrap();
    assert_eq!(completed.status, CampaignStatus::Completed.as_str());

    // completed is terminal
    let result = campaigns.update_campaign(&business, campaign.id, CampaignUpdate {
        status: Some(CampaignStatus::Active),
        ..Default::default()
    }).await;
    assert!(matches!(result, Err(AppError::InvalidStateTransition(_))));
}

#[tokio::test]
async fn budget_change_keeps_the_tracker_in_step() {
    let db = setup_db().await;
    let business = seed_user(&db, UserRole::Business).await;
    let campaigns = CampaignService::new(db.clone());
    let campaign = campaigns.create_campaign(&business, draft_input("300")).await.unwrap();

    campaigns
        .update_campaign(&business, campaign.id, CampaignUpdate {
            budget: Some(dec("450")),
            ..Default::default()
        }).await
        .unwrap();

    let tracking = campaigns.budget_tracking(&business, campaign.id).await.unwrap();
    assert_eq!(tracking.total_budget, dec("450"));
}

#[tokio::test]
async fn only_draft_or_cancelled_campaigns_can_be_deleted() {
    let db = setup_db().await;
    let business = seed_user(&db, UserRole::Business).await;
    let campaigns = CampaignService::new(db.clone());

    let draft = campaigns.create_campaign(&business, draft_input("300")).await.unwrap();
    campaigns.delete_campaign(&business, draft.id).await.unwrap();
    assert!(matches!(
        campaigns.get_campaign(draft.id).await,
        Err(AppError::NotFound(_))
    ));

    let active = active_campaign(&db, &business, "300").await;
    let result = campaigns.delete_campaign(&business, active.id).await;
    assert!(matches!(result, Err(AppError::InvalidStateTransition(_))));
}

#[tokio::test]
async fn creators_browse_only_active_campaigns() {
    let db = setup_db().await;
    let business = seed_user(&db, UserRole::Business).await;
    let creator = seed_user(&db, UserRole::Creator).await;
    let campaigns = CampaignService::new(db.clone());

    campaigns.create_campaign(&business, draft_input("300")).await.unwrap();
    let active = active_campaign(&db, &business, "500").await;

    let visible = campaigns.list_campaigns(&creator).await.unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, active.id);

    let owned = campaigns.list_campaigns(&business).await.unwrap();
    assert_eq!(owned.len(), 2);
}

#[tokio::test]
async fn applications_are_one_per_creator_and_need_an_active_campaign() {
    let db = setup_db().await;
    let business = seed_user(&db, UserRole::Business).await;
    let creator = seed_user(&db, UserRole::Creator).await;
    let campaigns = CampaignService::new(db.clone());

    let draft = campaigns.create_campaign(&business, draft_input("300")).await.unwrap();
    let result = campaigns.apply(&creator, draft.id, None).await;
    assert!(matches!(result, Err(AppError::InvalidStateTransition(_))));

    let active = active_campaign(&db, &business, "500").await;
    let participation = campaigns
        .apply(&creator, active.id, Some("I make great videos".to_string())).await
        .unwrap();
    assert_eq!(participation.status, ParticipationStatus::Pending.as_str());

    let duplicate = campaigns.apply(&creator, active.id, None).await;
    assert!(matches!(duplicate, Err(AppError::InvalidInput(_))));
}

#[tokio::test]
async fn participation_review_is_a_one_shot_decision() {
    let db = setup_db().await;
    let business = seed_user(&db, UserRole::Business).await;
    let creator = seed_user(&db, UserRole::Creator).await;
    let campaigns = CampaignService::new(db.clone());

    let campaign = active_campaign(&db, &business, "500").await;
    let participation = campaigns.apply(&creator, campaign.id, None).await.unwrap();

    let reviewed = campaigns
        .review_participation(
            &business,
            campaign.id,
            participation.id,
            ParticipationStatus::Approved
        ).await
        .unwrap();
    assert_eq!(reviewed.status, ParticipationStatus::Approved.as_str());
    assert!(reviewed.reviewed_at.is_some());

    let again = campaigns.review_participation(
        &business,
        campaign.id,
        participation.id,
        ParticipationStatus::Rejected
    ).await;
    assert!(matches!(again, Err(AppError::InvalidStateTransition(_))));
}

#[tokio::test]
async fn campaign_chat_is_limited_to_members() {
    let db = setup_db().await;
    let business = funded_business(&db, "500").await;
    let campaign = active_campaign(&db, &business, "300").await;
    let member = approved_creator(&db, &business, campaign.id).await;
    let outsider = seed_user(&db, UserRole::Creator).await;

    let campaigns = CampaignService::new(db.clone());

    campaigns.post_message(&business, campaign.id, "Welcome aboard".to_string()).await.unwrap();
    campaigns.post_message(&member, campaign.id, "Glad to be here".to_string()).await.unwrap();

    let result = campaigns.post_message(&outsider, campaign.id, "Hello?".to_string()).await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));

    let messages = campaigns.list_messages(&member, campaign.id).await.unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].body, "Welcome aboard");
}
