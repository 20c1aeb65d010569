use sea_orm::{
    ActiveModelTrait,
    ColumnTrait,
    DatabaseConnection,
    EntityTrait,
    QueryFilter,
    QueryOrder,
    Set,
    TransactionTrait,
    prelude::Decimal,
};
use uuid::Uuid;

use crate::db::entity::{ campaign, campaign_budget_tracking, campaign_message, participation };
use crate::enums::{ CampaignStatus, Currency, ParticipationStatus, UserRole };
use crate::error::{ AppError, Result };
use crate::policy::{ self, Actor };
use crate::validate;

pub struct NewCampaign {
    pub title: String,
    pub description: String,
    pub budget: Decimal,
    pub currency: Currency,
    pub starts_at: Option<chrono::DateTime<chrono::Utc>>,
    pub ends_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Default)]
pub struct CampaignUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub budget: Option<Decimal>,
    pub status: Option<CampaignStatus>,
    pub starts_at: Option<chrono::DateTime<chrono::Utc>>,
    pub ends_at: Option<chrono::DateTime<chrono::Utc>>,
}

pub struct CampaignService {
    db: DatabaseConnection,
}

impl CampaignService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a draft campaign together with its budget tracker.
    pub async fn create_campaign(
        &self,
        actor: &Actor,
        input: NewCampaign
    ) -> Result<campaign::Model> {
        policy::require_role(actor, UserRole::Business)?;
        validate::require_non_empty(&input.title, "Title")?;
        validate::require_max_len(&input.title, 200, "Title")?;
        validate::require_positive_amount(input.budget)?;

        let now = chrono::Utc::now();
        let txn = self.db.begin().await?;

        let model = campaign::ActiveModel {
            id: Set(Uuid::new_v4()),
            business_id: Set(actor.user_id),
            title: Set(input.title),
            description: Set(input.description),
            budget: Set(input.budget),
            currency: Set(input.currency.as_str().to_string()),
            status: Set(CampaignStatus::Draft.as_str().to_string()),
            starts_at: Set(input.starts_at),
            ends_at: Set(input.ends_at),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let created = model.insert(&txn).await?;

        let tracking = campaign_budget_tracking::ActiveModel {
            id: Set(Uuid::new_v4()),
            campaign_id: Set(created.id),
            total_budget: Set(created.budget),
            spent_amount: Set(Decimal::ZERO),
            updated_at: Set(now),
        };
        tracking.insert(&txn).await?;

        txn.commit().await?;
        Ok(created)
    }

    /// Businesses see their own campaigns; creators browse active ones.
    pub async fn list_campaigns(&self, actor: &Actor) -> Result<Vec<campaign::Model>> {
        let query = campaign::Entity::find().order_by_desc(campaign::Column::CreatedAt);

        let campaigns = (
            match actor.role {
                UserRole::Business =>
                    query.filter(campaign::Column::BusinessId.eq(actor.user_id)).all(&self.db),
                UserRole::Creator =>
                    query
                        .filter(campaign::Column::Status.eq(CampaignStatus::Active.as_str()))
                        .all(&self.db),
                UserRole::Admin => query.all(&self.db),
            }
        ).await?;

        Ok(campaigns)
    }

    pub async fn get_campaign(&self, id: Uuid) -> Result<campaign::Model> {
        campaign::Entity
            ::find_by_id(id)
            .one(&self.db).await?
            .ok_or(AppError::NotFound("Campaign"))
    }

    pub async fn budget_tracking(
        &self,
        actor: &Actor,
        campaign_id: Uuid
    ) -> Result<campaign_budget_tracking::Model> {
        let campaign = self.get_campaign(campaign_id).await?;
        policy::require_owner(actor, campaign.business_id, "campaign")?;

        campaign_budget_tracking::Entity
            ::find()
            .filter(campaign_budget_tracking::Column::CampaignId.eq(campaign_id))
            .one(&self.db).await?
            .ok_or(AppError::NotFound("Campaign budget tracking"))
    }

    pub async fn update_campaign(
        &self,
        actor: &Actor,
        id: Uuid,
        update: CampaignUpdate
    ) -> Result<campaign::Model> {
        let existing = self.get_campaign(id).await?;
        policy::require_owner(actor, existing.business_id, "campaign")?;

        let current: CampaignStatus = existing.status.parse()?;
        if let Some(next) = update.status {
            if !current.can_transition_to(next) {
                return Err(
                    AppError::InvalidStateTransition(
                        format!("Cannot move campaign from {} to {}", current, next)
                    )
                );
            }
        }
        if let Some(title) = &update.title {
            validate::require_non_empty(title, "Title")?;
            validate::require_max_len(title, 200, "Title")?;
        }
        if let Some(budget) = update.budget {
            validate::require_positive_amount(budget)?;
        }

        let now = chrono::Utc::now();
        let txn = self.db.begin().await?;

        let mut active: campaign::ActiveModel = existing.into();
        if let Some(title) = update.title {
            active.title = Set(title);
        }
        if let Some(description) = update.description {
            active.description = Set(description);
        }
        if let Some(budget) = update.budget {
            active.budget = Set(budget);

            // Keep the tracker's total in step with the campaign budget.
            let tracking = campaign_budget_tracking::Entity
                ::find()
                .filter(campaign_budget_tracking::Column::CampaignId.eq(id))
                .one(&txn).await?
                .ok_or(AppError::NotFound("Campaign budget tracking"))?;
            let mut tracking: campaign_budget_tracking::ActiveModel = tracking.into();
            tracking.total_budget = Set(budget);
            tracking.updated_at = Set(now);
            tracking.update(&txn).await?;
        }
        if let Some(status) = update.status {
            active.status = Set(status.as_str().to_string());
        }
        if let Some(starts_at) = update.starts_at {
            active.starts_at = Set(Some(starts_at));
        }
        if let Some(ends_at) = update.ends_at {
            active.ends_at = Set(Some(ends_at));
        }
        active.updated_at = Set(now);

        let updated = active.update(&txn).await?;
        txn.commit().await?;
        Ok(updated)
    }

    /// Campaigns with history stay around; only draft or cancelled ones can go.
    pub async fn delete_campaign(&self, actor: &Actor, id: Uuid) -> Result<()> {
        let existing = self.get_campaign(id).await?;
        policy::require_owner(actor, existing.business_id, "campaign")?;

        let status: CampaignStatus = existing.status.parse()?;
        if !matches!(status, CampaignStatus::Draft | CampaignStatus::Cancelled) {
            return Err(
                AppError::InvalidStateTransition(
                    format!("Cannot delete a {} campaign", status)
                )
            );
        }

        campaign::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    /// A creator applies to an active campaign; one application per campaign.
    pub async fn apply(
        &self,
        actor: &Actor,
        campaign_id: Uuid,
        pitch: Option<String>
    ) -> Result<participation::Model> {
        policy::require_role(actor, UserRole::Creator)?;

        let campaign = self.get_campaign(campaign_id).await?;
        let status: CampaignStatus = campaign.status.parse()?;
        if status != CampaignStatus::Active {
            return Err(
                AppError::InvalidStateTransition(
                    "Applications are only open for active campaigns".to_string()
                )
            );
        }

        let existing = participation::Entity
            ::find()
            .filter(participation::Column::CampaignId.eq(campaign_id))
            .filter(participation::Column::CreatorId.eq(actor.user_id))
            .one(&self.db).await?;
        if existing.is_some() {
            return Err(AppError::InvalidInput("Already applied to this campaign".to_string()));
        }

        let model = participation::ActiveModel {
            id: Set(Uuid::new_v4()),
            campaign_id: Set(campaign_id),
            creator_id: Set(actor.user_id),
            status: Set(ParticipationStatus::Pending.as_str().to_string()),
            pitch: Set(pitch),
            applied_at: Set(chrono::Utc::now()),
            reviewed_at: Set(None),
        };

        let created = model.insert(&self.db).await?;
        Ok(created)
    }

    pub async fn list_participants(
        &self,
        actor: &Actor,
        campaign_id: Uuid
    ) -> Result<Vec<participation::Model>> {
        let campaign = self.get_campaign(campaign_id).await?;
        policy::require_owner(actor, campaign.business_id, "campaign")?;

        let participants = participation::Entity
            ::find()
            .filter(participation::Column::CampaignId.eq(campaign_id))
            .order_by_desc(participation::Column::AppliedAt)
            .all(&self.db).await?;

        Ok(participants)
    }

    pub async fn review_participation(
        &self,
        actor: &Actor,
        campaign_id: Uuid,
        participation_id: Uuid,
        decision: ParticipationStatus
    ) -> Result<participation::Model> {
        if decision == ParticipationStatus::Pending {
            return Err(
                AppError::InvalidInput("Decision must be approved or rejected".to_string())
            );
        }

        let campaign = self.get_campaign(campaign_id).await?;
        policy::require_owner(actor, campaign.business_id, "campaign")?;

        let row = participation::Entity
            ::find_by_id(participation_id)
            .one(&self.db).await?
            .filter(|p| p.campaign_id == campaign_id)
            .ok_or(AppError::NotFound("Participation"))?;

        if row.status != ParticipationStatus::Pending.as_str() {
            return Err(
                AppError::InvalidStateTransition(
                    format!("Participation is already {}", row.status)
                )
            );
        }

        let mut active: participation::ActiveModel = row.into();
        active.status = Set(decision.as_str().to_string());
        active.reviewed_at = Set(Some(chrono::Utc::now()));

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Campaign chat is limited to the owner and approved participants.
    pub async fn post_message(
        &self,
        actor: &Actor,
        campaign_id: Uuid,
        body: String
    ) -> Result<campaign_message::Model> {
        validate::require_non_empty(&body, "Message body")?;
        validate::require_max_len(&body, 4000, "Message body")?;

        let campaign = self.get_campaign(campaign_id).await?;
        self.require_membership(actor, &campaign).await?;

        let model = campaign_message::ActiveModel {
            id: Set(Uuid::new_v4()),
            campaign_id: Set(campaign_id),
            sender_id: Set(actor.user_id),
            body: Set(body),
            created_at: Set(chrono::Utc::now()),
        };

        let created = model.insert(&self.db).await?;
        Ok(created)
    }

    pub async fn list_messages(
        &self,
        actor: &Actor,
        campaign_id: Uuid
    ) -> Result<Vec<campaign_message::Model>> {
        let campaign = self.get_campaign(campaign_id).await?;
        self.require_membership(actor, &campaign).await?;

        let messages = campaign_message::Entity
            ::find()
            .filter(campaign_message::Column::CampaignId.eq(campaign_id))
            .order_by_asc(campaign_message::Column::CreatedAt)
            .all(&self.db).await?;

        Ok(messages)
    }

    /// Find an approved participation for the actor, used by the video
    /// submission flow.
    pub async fn approved_participation(
        &self,
        creator_id: Uuid,
        campaign_id: Uuid
    ) -> Result<Option<participation::Model>> {
        let row = participation::Entity
            ::find()
            .filter(participation::Column::CampaignId.eq(campaign_id))
            .filter(participation::Column::CreatorId.eq(creator_id))
            .filter(participation::Column::Status.eq(ParticipationStatus::Approved.as_str()))
            .one(&self.db).await?;

        Ok(row)
    }

    async fn require_membership(&self, actor: &Actor, campaign: &campaign::Model) -> Result<()> {
        if campaign.business_id == actor.user_id {
            return Ok(());
        }

        let approved = self.approved_participation(actor.user_id, campaign.id).await?;
        if approved.is_some() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Not a member of this campaign".to_string()))
        }
    }
}
