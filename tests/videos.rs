mod common;

use common::{ active_campaign, approved_creator, funded_business, seed_user, setup_db };
use influo::enums::{ UserRole, VideoStatus };
use influo::error::AppError;
use influo::services::VideoService;
use influo::services::video_service::NewVideo;
use uuid::Uuid;

fn submission(campaign_id: Uuid) -> NewVideo {
    NewVideo {
        campaign_id,
        title: "Unboxing".to_string(),
        description: None,
        video_url: "https://cdn.example.com/v/unboxing.mp4".to_string(),
        asset_id: Some("asset-123".to_string()),
    }
}

#[tokio::test]
async fn submission_needs_an_approved_participation() {
    let db = setup_db().await;
    let business = funded_business(&db, "500").await;
    let campaign = active_campaign(&db, &business, "300").await;
    let outsider = seed_user(&db, UserRole::Creator).await;

    let videos = VideoService::new(db.clone());
    let result = videos.submit_video(&outsider, submission(campaign.id)).await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));

    let member = approved_creator(&db, &business, campaign.id).await;
    let video = videos.submit_video(&member, submission(campaign.id)).await.unwrap();
    assert_eq!(video.status, VideoStatus::Submitted.as_str());
    assert!(!video.posted_to_social);
}

#[tokio::test]
async fn submission_requires_an_active_campaign() {
    let db = setup_db().await;
    let business = funded_business(&db, "500").await;
    let campaign = active_campaign(&db, &business, "300").await;
    let member = approved_creator(&db, &business, campaign.id).await;

    use influo::enums::CampaignStatus;
    use influo::services::CampaignService;
    use influo::services::campaign_service::CampaignUpdate;

    let campaigns = CampaignService::new(db.clone());
    campaigns
        .update_campaign(&business, campaign.id, CampaignUpdate {
            status: Some(CampaignStatus::Paused),
            ..Default::default()
        }).await
        .unwrap();

    let videos = VideoService::new(db.clone());
    let result = videos.submit_video(&member, submission(campaign.id)).await;
    assert!(matches!(result, Err(AppError::InvalidStateTransition(_))));
}

#[tokio::test]
async fn review_records_the_reviewer_and_is_final() {
    let db = setup_db().await;
    let business = funded_business(&db, "500").await;
    let campaign = active_campaign(&db, &business, "300").await;
    let member = approved_creator(&db, &business, campaign.id).await;

    let videos = VideoService::new(db.clone());
    let video = videos.submit_video(&member, submission(campaign.id)).await.unwrap();

    let reviewed = videos.review_video(&business, video.id, VideoStatus::Approved).await.unwrap();
    assert_eq!(reviewed.status, VideoStatus::Approved.as_str());
    assert_eq!(reviewed.reviewed_by, Some(business.user_id));
    assert!(reviewed.reviewed_at.is_some());

    let again = videos.review_video(&business, video.id, VideoStatus::Rejected).await;
    assert!(matches!(again, Err(AppError::InvalidStateTransition(_))));
}

#[tokio::test]
async fn review_is_reserved_to_the_campaign_owner() {
    let db = setup_db().await;
    let business = funded_business(&db, "500").await;
    let campaign = active_campaign(&db, &business, "300").await;
    let member = approved_creator(&db, &business, campaign.id).await;
    let other_business = seed_user(&db, UserRole::Business).await;

    let videos = VideoService::new(db.clone());
    let video = videos.submit_video(&member, submission(campaign.id)).await.unwrap();

    let result = videos.review_video(&other_business, video.id, VideoStatus::Approved).await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn only_approved_videos_can_be_marked_posted() {
    let db = setup_db().await;
    let business = funded_business(&db, "500").await;
    let campaign = active_campaign(&db, &business, "300").await;
    let member = approved_creator(&db, &business, campaign.id).await;

    let videos = VideoService::new(db.clone());
    let video = videos.submit_video(&member, submission(campaign.id)).await.unwrap();

    let result = videos.mark_posted(&member, video.id).await;
    assert!(matches!(result, Err(AppError::InvalidStateTransition(_))));

    videos.review_video(&business, video.id, VideoStatus::Approved).await.unwrap();
    let posted = videos.mark_posted(&member, video.id).await.unwrap();
    assert!(posted.posted_to_social);
}

#[tokio::test]
async fn published_approved_videos_cannot_be_deleted() {
    let db = setup_db().await;
    let business = funded_business(&db, "500").await;
    let campaign = active_campaign(&db, &business, "300").await;
    let member = approved_creator(&db, &business, campaign.id).await;

    let videos = VideoService::new(db.clone());
    let video = videos.submit_video(&member, submission(campaign.id)).await.unwrap();
    videos.review_video(&business, video.id, VideoStatus::Approved).await.unwrap();
    videos.mark_posted(&member, video.id).await.unwrap();

    let result = videos.delete_video(&member, video.id).await;
    assert!(matches!(result, Err(AppError::InvalidStateTransition(_))));

    // A rejected video can still go.
    let other = videos.submit_video(&member, submission(campaign.id)).await.unwrap();
    videos.review_video(&business, other.id, VideoStatus::Rejected).await.unwrap();
    videos.delete_video(&member, other.id).await.unwrap();
}

#[tokio::test]
async fn metrics_must_be_non_negative() {
    let db = setup_db().await;
    let business = funded_business(&db, "500").await;
    let campaign = active_campaign(&db, &business, "300").await;
    let member = approved_creator(&db, &business, campaign.id).await;

    let videos = VideoService::new(db.clone());
    let video = videos.submit_video(&member, submission(campaign.id)).await.unwrap();

    let result = videos.update_metrics(&member, video.id, -1, 0, 0).await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    let updated = videos.update_metrics(&member, video.id, 1200, 300, 45).await.unwrap();
    assert_eq!(updated.view_count, 1200);
    assert_eq!(updated.like_count, 300);
    assert_eq!(updated.comment_count, 45);
}

#[tokio::test]
async fn analytics_fold_over_the_visible_videos() {
    let db = setup_db().await;
    let business = funded_business(&db, "500").await;
    let campaign = active_campaign(&db, &business, "300").await;
    let member = approved_creator(&db, &business, campaign.id).await;

    let videos = VideoService::new(db.clone());
    let first = videos.submit_video(&member, submission(campaign.id)).await.unwrap();
    let second = videos.submit_video(&member, submission(campaign.id)).await.unwrap();
    videos.review_video(&business, first.id, VideoStatus::Approved).await.unwrap();
    videos.update_metrics(&member, first.id, 100, 20, 5).await.unwrap();
    videos.update_metrics(&member, second.id, 50, 10, 2).await.unwrap();

    let analytics = videos.analytics(&member, None).await.unwrap();
    assert_eq!(analytics.total, 2);
    assert_eq!(analytics.approved, 1);
    assert_eq!(analytics.submitted, 1);
    assert_eq!(analytics.total_views, 150);
    assert_eq!(analytics.total_likes, 30);
    assert_eq!(analytics.total_comments, 7);
}

#[tokio::test]
async fn businesses_see_videos_for_their_campaigns_only() {
    let db = setup_db().await;
    let business = funded_business(&db, "500").await;
    let campaign = active_campaign(&db, &business, "300").await;
    let member = approved_creator(&db, &business, campaign.id).await;

    let other_business = funded_business(&db, "500").await;
    let other_campaign = active_campaign(&db, &other_business, "300").await;
    let other_member = approved_creator(&db, &other_business, other_campaign.id).await;

    let videos = VideoService::new(db.clone());
    videos.submit_video(&member, submission(campaign.id)).await.unwrap();
    videos.submit_video(&other_member, submission(other_campaign.id)).await.unwrap();

    let mine = videos.list_videos(&business, None).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].campaign_id, campaign.id);
}
