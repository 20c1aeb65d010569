use std::sync::Arc;

use axum::{
    extract::{ Request, State },
    http::header,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{ decode, encode, DecodingKey, EncodingKey, Header, Validation };
use serde::{ Deserialize, Serialize };
use uuid::Uuid;

use crate::config::Config;
use crate::enums::UserRole;
use crate::error::{ AppError, Result };

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: UserRole,
    pub email: String,
    pub exp: usize,
}

pub fn issue_token(
    user_id: Uuid,
    role: UserRole,
    email: &str,
    secret: &str,
    ttl_seconds: i64
) -> Result<String> {
    let exp = chrono::Utc::now().timestamp() + ttl_seconds;
    let claims = Claims {
        sub: user_id,
        role,
        email: email.to_string(),
        exp: exp as usize,
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).map_err(|e|
        AppError::Internal(format!("Failed to sign token: {}", e))
    )
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims> {
    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &Validation::default())
        .map(|data| data.claims)
        .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))
}

/// Extract and validate the bearer token, inserting `Claims` into request
/// extensions for downstream handlers.
pub async fn require_auth(
    State(config): State<Arc<Config>>,
    mut req: Request,
    next: Next
) -> Result<Response> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Expected bearer token".to_string()))?;

    let claims = decode_token(token, &config.jwt_secret)?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_and_decode_round_trip() {
        let id = Uuid::new_v4();
        let token = issue_token(id, UserRole::Creator, "c@example.com", "test-secret", 3600)
            .unwrap();
        let claims = decode_token(&token, "test-secret").unwrap();

        assert_eq!(claims.sub, id);
        assert_eq!(claims.role, UserRole::Creator);
        assert_eq!(claims.email, "c@example.com");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_token(Uuid::new_v4(), UserRole::Business, "b@example.com", "secret-a", 3600)
            .unwrap();
        assert!(decode_token(&token, "secret-b").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = issue_token(Uuid::new_v4(), UserRole::Business, "b@example.com", "secret", -120)
            .unwrap();
        assert!(decode_token(&token, "secret").is_err());
    }
}
