//! 인증 게이트 통합 테스트
//!
//! 참조 라우터 전체를 통해 공개 경로, 401, 403, 신원 전달을 확인합니다.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::AUTHORIZATION, Request, StatusCode},
    response::Response,
    Router,
};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use leafy_api::{
    create_api_router, issue_token, AppState, AuthErrorBody, AuthenticatedIdentity, Claims, Role,
};
use leafy_core::{AuthConfig, AuthSettings};
use serde_json::{json, Value};
use tower::ServiceExt;

const SECRET: &str = "integration-test-secret-0123456789abcdef";

fn settings() -> Arc<AuthSettings> {
    Arc::new(AuthConfig::with_secret(SECRET).validate().unwrap())
}

fn app() -> Router {
    create_api_router(AppState::new(settings()))
}

fn token_for(role: Role) -> String {
    let claims = Claims::new(
        "user-1001",
        "grower@leafy.health",
        role,
        Some("session-abc".to_string()),
        15,
    );
    issue_token(&claims, &settings()).unwrap()
}

async fn send(path: &str, authorization: Option<&str>) -> Response {
    let mut builder = Request::builder().uri(path);
    if let Some(value) = authorization {
        builder = builder.header(AUTHORIZATION, value);
    }
    app()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn json_body<T: serde::de::DeserializeOwned>(response: Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_is_public_without_header() {
    let response = send("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_body(response).await;
    assert_eq!(body["status"], "ok");

    // 실패 응답과 같은 형식 (밀리초, `Z`)
    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(timestamp.ends_with('Z'));
    assert_eq!(timestamp.len(), "2026-01-01T00:00:00.000Z".len());
}

#[tokio::test]
async fn test_health_is_public_even_with_garbage_header() {
    let response = send("/health", Some("Bearer abc.def.ghi")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_missing_header_returns_401_with_body() {
    let response = send("/api/me", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: AuthErrorBody = json_body(response).await;
    assert_eq!(body.status_code, 401);
    assert_eq!(body.message, "Authentication required");
    assert_eq!(body.path, "/api/me");
    assert!(chrono::DateTime::parse_from_rfc3339(&body.timestamp).is_ok());
}

#[tokio::test]
async fn test_non_bearer_scheme_returns_401() {
    let response = send("/api/me", Some("Token abcdef")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: AuthErrorBody = json_body(response).await;
    assert_eq!(body.message, "Authentication required");
}

#[tokio::test]
async fn test_malformed_jwt_returns_401() {
    let response = send("/api/me", Some("Bearer abc.def.ghi")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: AuthErrorBody = json_body(response).await;
    assert_eq!(body.message, "Invalid or expired authentication token");
}

#[tokio::test]
async fn test_wrongly_signed_token_returns_401() {
    let claims = Claims::new("user-1", "u@leafy.health", Role::Admin, None, 15);
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"some-other-secret-that-is-long-enough-000"),
    )
    .unwrap();

    let response = send("/api/me", Some(&format!("Bearer {token}"))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: AuthErrorBody = json_body(response).await;
    assert_eq!(body.message, "Invalid or expired authentication token");
}

#[tokio::test]
async fn test_expired_token_returns_401() {
    let now = Utc::now().timestamp();
    let token = encode(
        &Header::default(),
        &json!({"userId": "user-1", "role": "admin", "iat": now - 7200, "exp": now - 3600}),
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    let response = send("/api/me", Some(&format!("Bearer {token}"))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_with_audience_is_accepted() {
    let now = Utc::now().timestamp();
    let token = encode(
        &Header::default(),
        &json!({"userId": "u1", "role": "user", "aud": "leafyhealth-api", "exp": now + 600}),
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    let response = send("/api/me", Some(&format!("Bearer {token}"))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let identity: AuthenticatedIdentity = json_body(response).await;
    assert_eq!(identity.id, "u1");
    assert_eq!(identity.role, Role::User);
}

#[tokio::test]
async fn test_valid_token_identity_reflects_claims() {
    let response = send("/api/me", Some(&format!("Bearer {}", token_for(Role::User)))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let identity: AuthenticatedIdentity = json_body(response).await;
    assert_eq!(
        identity,
        AuthenticatedIdentity {
            id: "user-1001".to_string(),
            email: "grower@leafy.health".to_string(),
            role: Role::User,
            session_id: Some("session-abc".to_string()),
        }
    );
}

#[tokio::test]
async fn test_user_role_denied_on_admin_route() {
    let response = send(
        "/api/admin/overview",
        Some(&format!("Bearer {}", token_for(Role::User))),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body: AuthErrorBody = json_body(response).await;
    assert_eq!(body.status_code, 403);
    assert_eq!(body.path, "/api/admin/overview");
}

#[tokio::test]
async fn test_admin_role_passes_with_identity_attached() {
    let response = send(
        "/api/admin/overview",
        Some(&format!("Bearer {}", token_for(Role::Admin))),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_body(response).await;
    assert_eq!(body["viewer"]["id"], "user-1001");
    assert_eq!(body["viewer"]["role"], "admin");
    assert_eq!(body["viewer"]["sessionId"], "session-abc");
}

#[tokio::test]
async fn test_super_admin_passes_admin_route() {
    let response = send(
        "/api/admin/overview",
        Some(&format!("Bearer {}", token_for(Role::SuperAdmin))),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_admin_route_without_token_is_401_not_403() {
    let response = send("/api/admin/overview", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_custom_public_paths_replace_defaults() {
    let settings = AuthConfig::with_secret(SECRET)
        .with_public_paths(["/api/me"])
        .validate()
        .unwrap();
    let app = create_api_router(AppState::new(Arc::new(settings)));

    // /health는 더 이상 공개 경로가 아님
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // /api/me는 공개지만 신원이 없으므로 추출기가 401을 반환
    let response = app
        .oneshot(Request::builder().uri("/api/me").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[test]
fn test_startup_rejects_weak_and_default_secrets() {
    assert!(AuthConfig::with_secret("too-short").validate().is_err());
    assert!(
        AuthConfig::with_secret("development-secret-key-change-in-production")
            .validate()
            .is_err()
    );
}
