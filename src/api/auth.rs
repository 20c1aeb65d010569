use axum::{ Extension, Json, extract::State, http::StatusCode };
use serde::{ Deserialize, Serialize };
use uuid::Uuid;

use crate::auth::Claims;
use crate::db::entity::user;
use crate::enums::UserRole;
use crate::error::Result;
use crate::services::auth_service::RegisterInput;

use super::AppState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub role: UserRole,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct VerifyEmailRequest {
    pub token: String,
}

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

#[derive(Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub email_verified: bool,
    pub created_at: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            role: user.role,
            email_verified: user.email_verified,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>
) -> Result<(StatusCode, Json<UserResponse>)> {
    let user = state.auth_service.register(RegisterInput {
        email: request.email,
        password: request.password,
        display_name: request.display_name,
        role: request.role,
    }).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>
) -> Result<Json<LoginResponse>> {
    let (token, user) = state.auth_service.login(&request.email, &request.password).await?;

    Ok(
        Json(LoginResponse {
            token,
            user: user.into(),
        })
    )
}

pub async fn verify_email(
    State(state): State<AppState>,
    Json(request): Json<VerifyEmailRequest>
) -> Result<Json<UserResponse>> {
    let user = state.auth_service.verify_email(&request.token).await?;
    Ok(Json(user.into()))
}

pub async fn forgot_password(
    State(state): State<AppState>,
    Json(request): Json<ForgotPasswordRequest>
) -> Result<Json<StatusResponse>> {
    state.auth_service.forgot_password(&request.email).await?;
    Ok(Json(StatusResponse { status: "ok" }))
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>
) -> Result<Json<UserResponse>> {
    let user = state.auth_service.reset_password(&request.token, &request.new_password).await?;
    Ok(Json(user.into()))
}

pub async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>
) -> Result<Json<UserResponse>> {
    let user = state.auth_service.me(claims.sub).await?;
    Ok(Json(user.into()))
}
