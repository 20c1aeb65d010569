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

use crate::db::entity::{ campaign, participation, video };
use crate::enums::{ CampaignStatus, ParticipationStatus, UserRole, VideoStatus };
use crate::error::{ AppError, Result };
use crate::policy::{ self, Actor };
use crate::validate;

pub struct NewVideo {
    pub campaign_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub video_url: String,
    pub asset_id: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct VideoAnalytics {
    pub total: u64,
    pub submitted: u64,
    pub approved: u64,
    pub rejected: u64,
    pub posted_to_social: u64,
    pub total_views: i64,
    pub total_likes: i64,
    pub total_comments: i64,
}

pub struct VideoService {
    db: DatabaseConnection,
}

impl VideoService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Submit a video for a campaign. Requires an approved participation and
    /// an active campaign; new submissions always start as `submitted`.
    pub async fn submit_video(&self, actor: &Actor, input: NewVideo) -> Result<video::Model> {
        policy::require_role(actor, UserRole::Creator)?;
        validate::require_non_empty(&input.title, "Title")?;
        validate::require_max_len(&input.title, 200, "Title")?;
        validate::require_non_empty(&input.video_url, "Video URL")?;

        let campaign = campaign::Entity
            ::find_by_id(input.campaign_id)
            .one(&self.db).await?
            .ok_or(AppError::NotFound("Campaign"))?;

        let campaign_status: CampaignStatus = campaign.status.parse()?;
        if campaign_status != CampaignStatus::Active {
            return Err(
                AppError::InvalidStateTransition(
                    "Videos can only be submitted to active campaigns".to_string()
                )
            );
        }

        let approved = participation::Entity
            ::find()
            .filter(participation::Column::CampaignId.eq(input.campaign_id))
            .filter(participation::Column::CreatorId.eq(actor.user_id))
            .filter(participation::Column::Status.eq(ParticipationStatus::Approved.as_str()))
            .one(&self.db).await?;
        if approved.is_none() {
            return Err(
                AppError::Forbidden(
                    "An approved participation is required to submit videos".to_string()
                )
            );
        }

        let now = chrono::Utc::now();
        let model = video::ActiveModel {
            id: Set(Uuid::new_v4()),
            campaign_id: Set(input.campaign_id),
            creator_id: Set(actor.user_id),
            title: Set(input.title),
            description: Set(input.description),
            video_url: Set(input.video_url),
            asset_id: Set(input.asset_id),
            status: Set(VideoStatus::Submitted.as_str().to_string()),
            posted_to_social: Set(false),
            view_count: Set(0),
            like_count: Set(0),
            comment_count: Set(0),
            reviewed_by: Set(None),
            reviewed_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = model.insert(&self.db).await?;
        Ok(created)
    }

    /// Creators see their own videos; businesses see videos submitted to
    /// their campaigns.
    pub async fn list_videos(
        &self,
        actor: &Actor,
        campaign_id: Option<Uuid>
    ) -> Result<Vec<video::Model>> {
        let mut query = video::Entity::find().order_by_desc(video::Column::CreatedAt);

        if let Some(campaign_id) = campaign_id {
            query = query.filter(video::Column::CampaignId.eq(campaign_id));
        }

        let videos = (
            match actor.role {
                UserRole::Creator =>
                    query.filter(video::Column::CreatorId.eq(actor.user_id)).all(&self.db),
                UserRole::Business => {
                    let campaign_ids: Vec<Uuid> = campaign::Entity
                        ::find()
                        .filter(campaign::Column::BusinessId.eq(actor.user_id))
                        .all(&self.db).await?
                        .into_iter()
                        .map(|c| c.id)
                        .collect();
                    query.filter(video::Column::CampaignId.is_in(campaign_ids)).all(&self.db)
                }
                UserRole::Admin => query.all(&self.db),
            }
        ).await?;

        Ok(videos)
    }

    pub async fn get_video(&self, id: Uuid) -> Result<video::Model> {
        video::Entity
            ::find_by_id(id)
            .one(&self.db).await?
            .ok_or(AppError::NotFound("Video"))
    }

    /// Review by the campaign's owning business: submitted -> approved or
    /// rejected, recording reviewer and timestamp.
    pub async fn review_video(
        &self,
        actor: &Actor,
        video_id: Uuid,
        decision: VideoStatus
    ) -> Result<video::Model> {
        if decision == VideoStatus::Submitted {
            return Err(
                AppError::InvalidInput("Decision must be approved or rejected".to_string())
            );
        }

        let row = self.get_video(video_id).await?;

        let campaign = campaign::Entity
            ::find_by_id(row.campaign_id)
            .one(&self.db).await?
            .ok_or(AppError::NotFound("Campaign"))?;
        policy::require_owner(actor, campaign.business_id, "campaign")?;

        if row.status != VideoStatus::Submitted.as_str() {
            return Err(
                AppError::InvalidStateTransition(format!("Video is already {}", row.status))
            );
        }

        let now = chrono::Utc::now();
        let mut active: video::ActiveModel = row.into();
        active.status = Set(decision.as_str().to_string());
        active.reviewed_by = Set(Some(actor.user_id));
        active.reviewed_at = Set(Some(now));
        active.updated_at = Set(now);

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Flag an approved video as published on social media.
    pub async fn mark_posted(&self, actor: &Actor, video_id: Uuid) -> Result<video::Model> {
        let row = self.get_video(video_id).await?;
        policy::require_owner(actor, row.creator_id, "video")?;

        if row.status != VideoStatus::Approved.as_str() {
            return Err(
                AppError::InvalidStateTransition(
                    "Only approved videos can be posted to social media".to_string()
                )
            );
        }

        let mut active: video::ActiveModel = row.into();
        active.posted_to_social = Set(true);
        active.updated_at = Set(chrono::Utc::now());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    pub async fn update_metrics(
        &self,
        actor: &Actor,
        video_id: Uuid,
        views: i64,
        likes: i64,
        comments: i64
    ) -> Result<video::Model> {
        let row = self.get_video(video_id).await?;
        policy::require_owner(actor, row.creator_id, "video")?;

        if views < 0 || likes < 0 || comments < 0 {
            return Err(AppError::Validation("Metrics must not be negative".to_string()));
        }

        let mut active: video::ActiveModel = row.into();
        active.view_count = Set(views);
        active.like_count = Set(likes);
        active.comment_count = Set(comments);
        active.updated_at = Set(chrono::Utc::now());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Deletion is blocked once a video is approved and already live on
    /// social media.
    pub async fn delete_video(&self, actor: &Actor, video_id: Uuid) -> Result<()> {
        let row = self.get_video(video_id).await?;
        policy::require_owner(actor, row.creator_id, "video")?;

        if row.status == VideoStatus::Approved.as_str() && row.posted_to_social {
            return Err(
                AppError::InvalidStateTransition(
                    "Cannot delete an approved video that is posted to social media".to_string()
                )
            );
        }

        video::Entity::delete_by_id(video_id).exec(&self.db).await?;
        Ok(())
    }

    /// Status breakdown and engagement totals over the actor's visible videos.
    pub async fn analytics(
        &self,
        actor: &Actor,
        campaign_id: Option<Uuid>
    ) -> Result<VideoAnalytics> {
        let videos = self.list_videos(actor, campaign_id).await?;

        let mut analytics = VideoAnalytics {
            total: videos.len() as u64,
            submitted: 0,
            approved: 0,
            rejected: 0,
            posted_to_social: 0,
            total_views: 0,
            total_likes: 0,
            total_comments: 0,
        };

        for v in videos {
            match v.status.as_str() {
                "submitted" => {
                    analytics.submitted += 1;
                }
                "approved" => {
                    analytics.approved += 1;
                }
                "rejected" => {
                    analytics.rejected += 1;
                }
                _ => {}
            }
            if v.posted_to_social {
                analytics.posted_to_social += 1;
            }
            analytics.total_views += v.view_count;
            analytics.total_likes += v.like_count;
            analytics.total_comments += v.comment_count;
        }

        Ok(analytics)
    }
}
