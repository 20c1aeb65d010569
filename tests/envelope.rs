use axum::{ Json, Router, body::Body, middleware, routing::{ get, post } };
use axum::http::{ Request, StatusCode, header::CONTENT_TYPE };
use serde_json::Value;
use tower::ServiceExt;

use influo::api::envelope::wrap_response;
use influo::error::AppError;

async fn echo(Json(payload): Json<Value>) -> Json<Value> {
    Json(payload)
}

async fn missing() -> AppError {
    AppError::NotFound("Widget")
}

fn app() -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/widgets", post(echo))
        .route("/widgets/missing", get(missing))
        .layer(middleware::from_fn(wrap_response))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn success_bodies_are_wrapped() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/widgets")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name":"ring light"}"#))
                .unwrap()
        ).await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "ring light");
    assert_eq!(body["path"], "/widgets");
    assert_eq!(body["method"], "POST");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn malformed_json_gets_the_error_envelope() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/widgets")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from("{ not json"))
                .unwrap()
        ).await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(
        response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap()
            .starts_with("application/json")
    );

    let body = body_json(response).await;
    assert_eq!(body["statusCode"], 400);
    assert_eq!(body["error"], "INVALID_REQUEST");
    assert!(!body["message"].as_str().unwrap().is_empty());
    assert_eq!(body["path"], "/widgets");
    assert_eq!(body["method"], "POST");
}

#[tokio::test]
async fn domain_errors_keep_their_code() {
    let response = app()
        .oneshot(Request::builder().uri("/widgets/missing").body(Body::empty()).unwrap()).await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["statusCode"], 404);
    assert_eq!(body["error"], "NOT_FOUND");
    assert_eq!(body["message"], "Widget not found");
}

#[tokio::test]
async fn unknown_routes_get_the_envelope_too() {
    let response = app()
        .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap()).await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["statusCode"], 404);
    assert_eq!(body["error"], "INVALID_REQUEST");
    assert_eq!(body["message"], "Not Found");
}

#[tokio::test]
async fn plain_text_success_passes_through() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap()).await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"OK");
}
