use std::sync::Arc;

use axum::{ Router, extract::DefaultBodyLimit, middleware, routing::{ delete, get, patch, post } };
use tower_http::{ cors::CorsLayer, trace::TraceLayer };

pub mod auth;
pub mod campaign;
pub mod envelope;
pub mod social_media;
pub mod transaction;
pub mod video;

use crate::config::Config;
use crate::services::{
    AuthService,
    CampaignService,
    LedgerService,
    SocialMediaService,
    VideoService,
};
use crate::storage::StorageClient;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub campaign_service: Arc<CampaignService>,
    pub video_service: Arc<VideoService>,
    pub ledger_service: Arc<LedgerService>,
    pub social_media_service: Arc<SocialMediaService>,
    pub storage: Arc<StorageClient>,
    pub config: Arc<Config>,
}

pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(health_check))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/verify-email", post(auth::verify_email))
        .route("/api/auth/forgot-password", post(auth::forgot_password))
        .route("/api/auth/reset-password", post(auth::reset_password));

    let protected = Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/campaigns", post(campaign::create_campaign).get(campaign::list_campaigns))
        .route(
            "/api/campaigns/{id}",
            get(campaign::get_campaign)
                .patch(campaign::update_campaign)
                .delete(campaign::delete_campaign)
        )
        .route("/api/campaigns/{id}/budget", get(campaign::budget_tracking))
        .route("/api/campaigns/{id}/apply", post(campaign::apply))
        .route("/api/campaigns/{id}/participants", get(campaign::list_participants))
        .route(
            "/api/campaigns/{id}/participants/{participation_id}",
            patch(campaign::review_participation)
        )
        .route(
            "/api/campaigns/{id}/messages",
            get(campaign::list_messages).post(campaign::post_message)
        )
        .route("/api/videos", post(video::submit_video).get(video::list_videos))
        .route("/api/videos/upload", post(video::upload))
        .route("/api/videos/analytics", get(video::analytics))
        .route("/api/videos/{id}", get(video::get_video).delete(video::delete_video))
        .route("/api/videos/{id}/review", patch(video::review_video))
        .route("/api/videos/{id}/posted", patch(video::mark_posted))
        .route("/api/videos/{id}/metrics", patch(video::update_metrics))
        .route(
            "/api/transactions",
            post(transaction::create_transaction).get(transaction::list_transactions)
        )
        .route("/api/transactions/balance", get(transaction::balance))
        .route("/api/transactions/deposit", post(transaction::deposit))
        .route("/api/transactions/withdraw", post(transaction::withdraw))
        .route("/api/transactions/payment", post(transaction::process_payment))
        .route("/api/transactions/statistics", get(transaction::statistics))
        .route("/api/transactions/{id}/settle", patch(transaction::settle_withdrawal))
        .route(
            "/api/social-media/connect",
            post(social_media::connect)
        )
        .route("/api/social-media", get(social_media::list))
        .route("/api/social-media/analytics", get(social_media::analytics))
        .route("/api/social-media/admin/expiring-tokens", get(social_media::expiring_tokens))
        .route("/api/social-media/{platform}", delete(social_media::disconnect))
        .route("/api/social-media/{platform}/refresh-token", post(social_media::refresh_token))
        .route("/api/social-media/{platform}/sync", post(social_media::sync))
        .layer(middleware::from_fn_with_state(state.config.clone(), crate::auth::require_auth));

    let upload_limit = state.config.storage.max_video_bytes + 64 * 1024;

    public
        .merge(protected)
        .with_state(state)
        .layer(middleware::from_fn(envelope::wrap_response))
        .layer(DefaultBodyLimit::max(upload_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn health_check() -> &'static str {
    "OK"
}
