//! Uniform response envelope. Success bodies become
//! `{ success, data, timestamp, path, method }`, error bodies become
//! `{ statusCode, timestamp, path, method, error, message }`. The error
//! responder supplies `error`/`message` for domain failures; extractor
//! rejections arrive as plain text and are folded into the same shape here.

use axum::{
    body::Body,
    extract::Request,
    http::header::{ CONTENT_LENGTH, CONTENT_TYPE, HeaderValue },
    middleware::Next,
    response::Response,
};
use serde_json::{ Value, json };

pub async fn wrap_response(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    let (mut parts, body) = response.into_parts();

    let is_json = parts.headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/json"))
        .unwrap_or(false);

    // Non-JSON success responses (health check, streams) pass through
    // untouched; everything else gets enveloped.
    if !is_json && parts.status.is_success() {
        return Response::from_parts(parts, body);
    }

    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(%method, path, error = %e, "Failed to buffer response body");
            return Response::from_parts(parts, Body::empty());
        }
    };

    let timestamp = chrono::Utc::now().to_rfc3339();

    let envelope = if parts.status.is_success() {
        let payload: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        json!({
            "success": true,
            "data": payload,
            "timestamp": timestamp,
            "path": path,
            "method": method.as_str(),
        })
    } else {
        let fallback = parts.status.canonical_reason().unwrap_or("Error");
        let (error, message) = if is_json {
            let payload: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            (
                payload
                    .get("error")
                    .cloned()
                    .unwrap_or_else(|| json!("UNKNOWN_ERROR")),
                payload
                    .get("message")
                    .cloned()
                    .unwrap_or_else(|| json!(fallback)),
            )
        } else {
            // Malformed bodies and bad path/query parameters are rejected
            // by the extractors as plain text.
            let text = String::from_utf8_lossy(&bytes);
            let message = if text.trim().is_empty() {
                fallback.to_string()
            } else {
                text.into_owned()
            };
            (json!("INVALID_REQUEST"), json!(message))
        };

        if parts.status.is_server_error() {
            tracing::error!(%method, path, status = parts.status.as_u16(), %message, "Request failed");
        } else {
            tracing::warn!(%method, path, status = parts.status.as_u16(), %message, "Request rejected");
        }

        json!({
            "statusCode": parts.status.as_u16(),
            "timestamp": timestamp,
            "path": path,
            "method": method.as_str(),
            "error": error,
            "message": message,
        })
    };

    let body_bytes = serde_json::to_vec(&envelope).unwrap_or_else(|_| b"{}".to_vec());
    parts.headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    parts.headers.insert(CONTENT_LENGTH, HeaderValue::from(body_bytes.len()));

    Response::from_parts(parts, Body::from(body_bytes))
}
