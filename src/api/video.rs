use axum::{
    Extension,
    Json,
    extract::{ Multipart, Path, Query, State },
    http::StatusCode,
};
use serde::{ Deserialize, Serialize };
use uuid::Uuid;

use crate::auth::Claims;
use crate::db::entity::video;
use crate::enums::VideoStatus;
use crate::error::{ AppError, Result };
use crate::policy::Actor;
use crate::services::video_service::{ NewVideo, VideoAnalytics };
use crate::storage::{ MediaKind, UploadedAsset };

use super::AppState;

#[derive(Deserialize)]
pub struct SubmitVideoRequest {
    pub campaign_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub video_url: String,
    pub asset_id: Option<String>,
}

#[derive(Deserialize)]
pub struct ListQueryParams {
    pub campaign_id: Option<Uuid>,
}

#[derive(Deserialize)]
pub struct ReviewVideoRequest {
    pub decision: VideoStatus,
}

#[derive(Deserialize)]
pub struct UpdateMetricsRequest {
    pub view_count: i64,
    pub like_count: i64,
    pub comment_count: i64,
}

#[derive(Serialize)]
pub struct VideoResponse {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub creator_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub video_url: String,
    pub status: String,
    pub posted_to_social: bool,
    pub view_count: i64,
    pub like_count: i64,
    pub comment_count: i64,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<String>,
    pub created_at: String,
}

impl From<video::Model> for VideoResponse {
    fn from(v: video::Model) -> Self {
        Self {
            id: v.id,
            campaign_id: v.campaign_id,
            creator_id: v.creator_id,
            title: v.title,
            description: v.description,
            video_url: v.video_url,
            status: v.status,
            posted_to_social: v.posted_to_social,
            view_count: v.view_count,
            like_count: v.like_count,
            comment_count: v.comment_count,
            reviewed_by: v.reviewed_by,
            reviewed_at: v.reviewed_at.map(|t| t.to_rfc3339()),
            created_at: v.created_at.to_rfc3339(),
        }
    }
}

pub async fn submit_video(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<SubmitVideoRequest>
) -> Result<(StatusCode, Json<VideoResponse>)> {
    let actor = Actor::from(&claims);
    let video = state.video_service.submit_video(&actor, NewVideo {
        campaign_id: request.campaign_id,
        title: request.title,
        description: request.description,
        video_url: request.video_url,
        asset_id: request.asset_id,
    }).await?;

    Ok((StatusCode::CREATED, Json(video.into())))
}

/// Accepts a single multipart `file` field and pushes it to the media
/// provider. The returned asset can then be referenced when submitting.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart
) -> Result<Json<UploadedAsset>> {
    while
        let Some(field) = multipart
            .next_field().await
            .map_err(|e| AppError::InvalidInput(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "upload".to_string());
        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let kind = if content_type.starts_with("image/") {
            MediaKind::Image
        } else if content_type.starts_with("video/") {
            MediaKind::Video
        } else {
            return Err(
                AppError::InvalidInput(format!("Unsupported content type: {content_type}"))
            );
        };

        let bytes = field
            .bytes().await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read upload: {e}")))?;

        let asset = state.storage.upload(kind, file_name, bytes.to_vec()).await?;
        return Ok(Json(asset));
    }

    Err(AppError::InvalidInput("Missing `file` field".to_string()))
}

pub async fn list_videos(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<ListQueryParams>
) -> Result<Json<Vec<VideoResponse>>> {
    let actor = Actor::from(&claims);
    let videos = state.video_service.list_videos(&actor, params.campaign_id).await?;
    Ok(Json(videos.into_iter().map(Into::into).collect()))
}

pub async fn get_video(
    State(state): State<AppState>,
    Path(id): Path<Uuid>
) -> Result<Json<VideoResponse>> {
    let video = state.video_service.get_video(id).await?;
    Ok(Json(video.into()))
}

pub async fn review_video(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(request): Json<ReviewVideoRequest>
) -> Result<Json<VideoResponse>> {
    let actor = Actor::from(&claims);
    let video = state.video_service.review_video(&actor, id, request.decision).await?;
    Ok(Json(video.into()))
}

pub async fn mark_posted(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>
) -> Result<Json<VideoResponse>> {
    let actor = Actor::from(&claims);
    let video = state.video_service.mark_posted(&actor, id).await?;
    Ok(Json(video.into()))
}

pub async fn update_metrics(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateMetricsRequest>
) -> Result<Json<VideoResponse>> {
    let actor = Actor::from(&claims);
    let video = state.video_service.update_metrics(
        &actor,
        id,
        request.view_count,
        request.like_count,
        request.comment_count
    ).await?;

    Ok(Json(video.into()))
}

pub async fn delete_video(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>
) -> Result<StatusCode> {
    let actor = Actor::from(&claims);
    state.video_service.delete_video(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn analytics(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<ListQueryParams>
) -> Result<Json<VideoAnalytics>> {
    let actor = Actor::from(&claims);
    let analytics = state.video_service.analytics(&actor, params.campaign_id).await?;
    Ok(Json(analytics))
}
