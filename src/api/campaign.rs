use axum::{ Extension, Json, extract::{ Path, State }, http::StatusCode };
use sea_orm::prelude::Decimal;
use serde::{ Deserialize, Serialize };
use uuid::Uuid;

use crate::auth::Claims;
use crate::db::entity::{ campaign, campaign_budget_tracking, campaign_message, participation };
use crate::enums::{ CampaignStatus, Currency, ParticipationStatus };
use crate::error::Result;
use crate::policy::Actor;
use crate::services::campaign_service::{ CampaignUpdate, NewCampaign };

use super::AppState;

#[derive(Deserialize)]
pub struct CreateCampaignRequest {
    pub title: String,
    pub description: String,
    pub budget: Decimal,
    pub currency: Currency,
    pub starts_at: Option<chrono::DateTime<chrono::Utc>>,
    pub ends_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Deserialize)]
pub struct UpdateCampaignRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub budget: Option<Decimal>,
    pub status: Option<CampaignStatus>,
    pub starts_at: Option<chrono::DateTime<chrono::Utc>>,
    pub ends_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Deserialize)]
pub struct ApplyRequest {
    pub pitch: Option<String>,
}

#[derive(Deserialize)]
pub struct ReviewParticipationRequest {
    pub decision: ParticipationStatus,
}

#[derive(Deserialize)]
pub struct PostMessageRequest {
    pub body: String,
}

#[derive(Serialize)]
pub struct CampaignResponse {
    pub id: Uuid,
    pub business_id: Uuid,
    pub title: String,
    pub description: String,
    pub budget: Decimal,
    pub currency: String,
    pub status: String,
    pub starts_at: Option<String>,
    pub ends_at: Option<String>,
    pub created_at: String,
}

#[derive(Serialize)]
pub struct BudgetTrackingResponse {
    pub campaign_id: Uuid,
    pub total_budget: Decimal,
    pub spent_amount: Decimal,
    pub updated_at: String,
}

#[derive(Serialize)]
pub struct ParticipationResponse {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub creator_id: Uuid,
    pub status: String,
    pub pitch: Option<String>,
    pub applied_at: String,
    pub reviewed_at: Option<String>,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub sender_id: Uuid,
    pub body: String,
    pub created_at: String,
}

impl From<campaign::Model> for CampaignResponse {
    fn from(c: campaign::Model) -> Self {
        Self {
            id: c.id,
            business_id: c.business_id,
            title: c.title,
            description: c.description,
            budget: c.budget,
            currency: c.currency,
            status: c.status,
            starts_at: c.starts_at.map(|t| t.to_rfc3339()),
            ends_at: c.ends_at.map(|t| t.to_rfc3339()),
            created_at: c.created_at.to_rfc3339(),
        }
    }
}

impl From<campaign_budget_tracking::Model> for BudgetTrackingResponse {
    fn from(t: campaign_budget_tracking::Model) -> Self {
        Self {
            campaign_id: t.campaign_id,
            total_budget: t.total_budget,
            spent_amount: t.spent_amount,
            updated_at: t.updated_at.to_rfc3339(),
        }
    }
}

impl From<participation::Model> for ParticipationResponse {
    fn from(p: participation::Model) -> Self {
        Self {
            id: p.id,
            campaign_id: p.campaign_id,
            creator_id: p.creator_id,
            status: p.status,
            pitch: p.pitch,
            applied_at: p.applied_at.to_rfc3339(),
            reviewed_at: p.reviewed_at.map(|t| t.to_rfc3339()),
        }
    }
}

impl From<campaign_message::Model> for MessageResponse {
    fn from(m: campaign_message::Model) -> Self {
        Self {
            id: m.id,
            campaign_id: m.campaign_id,
            sender_id: m.sender_id,
            body: m.body,
            created_at: m.created_at.to_rfc3339(),
        }
    }
}

pub async fn create_campaign(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<CreateCampaignRequest>
) -> Result<(StatusCode, Json<CampaignResponse>)> {
    let actor = Actor::from(&claims);
    let campaign = state.campaign_service.create_campaign(&actor, NewCampaign {
        title: request.title,
        description: request.description,
        budget: request.budget,
        currency: request.currency,
        starts_at: request.starts_at,
        ends_at: request.ends_at,
    }).await?;

    Ok((StatusCode::CREATED, Json(campaign.into())))
}

pub async fn list_campaigns(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>
) -> Result<Json<Vec<CampaignResponse>>> {
    let actor = Actor::from(&claims);
    let campaigns = state.campaign_service.list_campaigns(&actor).await?;
    Ok(Json(campaigns.into_iter().map(Into::into).collect()))
}

pub async fn get_campaign(
    State(state): State<AppState>,
    Path(id): Path<Uuid>
) -> Result<Json<CampaignResponse>> {
    let campaign = state.campaign_service.get_campaign(id).await?;
    Ok(Json(campaign.into()))
}

pub async fn budget_tracking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>
) -> Result<Json<BudgetTrackingResponse>> {
    let actor = Actor::from(&claims);
    let tracking = state.campaign_service.budget_tracking(&actor, id).await?;
    Ok(Json(tracking.into()))
}

pub async fn update_campaign(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCampaignRequest>
) -> Result<Json<CampaignResponse>> {
    let actor = Actor::from(&claims);
    let campaign = state.campaign_service.update_campaign(&actor, id, CampaignUpdate {
        title: request.title,
        description: request.description,
        budget: request.budget,
        status: request.status,
        starts_at: request.starts_at,
        ends_at: request.ends_at,
    }).await?;

    Ok(Json(campaign.into()))
}

pub async fn delete_campaign(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>
) -> Result<StatusCode> {
    let actor = Actor::from(&claims);
    state.campaign_service.delete_campaign(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn apply(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(request): Json<ApplyRequest>
) -> Result<(StatusCode, Json<ParticipationResponse>)> {
    let actor = Actor::from(&claims);
    let participation = state.campaign_service.apply(&actor, id, request.pitch).await?;
    Ok((StatusCode::CREATED, Json(participation.into())))
}

pub async fn list_participants(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>
) -> Result<Json<Vec<ParticipationResponse>>> {
    let actor = Actor::from(&claims);
    let participants = state.campaign_service.list_participants(&actor, id).await?;
    Ok(Json(participants.into_iter().map(Into::into).collect()))
}

pub async fn review_participation(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((id, participation_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<ReviewParticipationRequest>
) -> Result<Json<ParticipationResponse>> {
    let actor = Actor::from(&claims);
    let participation = state.campaign_service.review_participation(
        &actor,
        id,
        participation_id,
        request.decision
    ).await?;

    Ok(Json(participation.into()))
}

pub async fn post_message(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(request): Json<PostMessageRequest>
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let actor = Actor::from(&claims);
    let message = state.campaign_service.post_message(&actor, id, request.body).await?;
    Ok((StatusCode::CREATED, Json(message.into())))
}

pub async fn list_messages(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>
) -> Result<Json<Vec<MessageResponse>>> {
    let actor = Actor::from(&claims);
    let messages = state.campaign_service.list_messages(&actor, id).await?;
    Ok(Json(messages.into_iter().map(Into::into).collect()))
}
