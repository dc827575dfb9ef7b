//! Axum용 JWT 인증 게이트.
//!
//! 요청마다 다음 중 하나로 판정합니다:
//!
//! 1. 공개 경로 → 헤더를 보지 않고 통과
//! 2. `Authorization: Bearer <token>` 없음/형식 오류 → 401
//! 3. 토큰 검증 실패 (서명, 형식, 만료) → 401
//! 4. 검증 성공 → [`AuthenticatedIdentity`]를 extensions에 넣고 다음 단계로
//!
//! 역할 검사는 [`super::guard`]가 이어서 수행합니다.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use leafy_core::AuthSettings;

use super::{AuthenticatedIdentity, TokenVerifier};
use crate::error::{request_path, AuthError};
use crate::metrics::{record_gate_decision, GateOutcome};

/// 게이트 판정 결과 (성공 케이스).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// 공개 경로. 신원 없음.
    Public,
    /// 토큰 검증 성공.
    Authenticated(AuthenticatedIdentity),
}

/// 인증 게이트.
///
/// 검증된 설정과 토큰 검증기를 불변으로 보유하며, 복제 비용이 낮아
/// `from_fn_with_state`의 상태로 그대로 사용합니다.
#[derive(Clone)]
pub struct AuthGate {
    settings: Arc<AuthSettings>,
    verifier: Arc<TokenVerifier>,
}

impl AuthGate {
    pub fn new(settings: Arc<AuthSettings>) -> Self {
        let verifier = Arc::new(TokenVerifier::new(&settings));
        Self { settings, verifier }
    }

    pub fn settings(&self) -> &AuthSettings {
        &self.settings
    }

    /// 경로와 헤더로 요청을 판정합니다.
    pub fn evaluate(&self, path: &str, headers: &HeaderMap) -> Result<GateDecision, AuthError> {
        if self.settings.is_public_path(path) {
            return Ok(GateDecision::Public);
        }

        let token = bearer_token(headers).ok_or_else(|| {
            tracing::warn!(path = %path, reason = "missing_or_malformed_header", "Authentication failed");
            AuthError::AuthenticationRequired
        })?;

        let identity = self.verifier.verify(token).map_err(|e| {
            tracing::warn!(path = %path, reason = e.reason(), "Authentication failed");
            AuthError::InvalidToken
        })?;

        tracing::debug!(
            path = %path,
            user_id = %identity.id,
            role = %identity.role,
            "Request authenticated"
        );

        Ok(GateDecision::Authenticated(identity))
    }
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// `Authorization` 헤더에서 Bearer 토큰 추출.
///
/// 헤더가 없거나, UTF-8이 아니거나, `Bearer ` 접두사가 없거나, 토큰이 비어 있으면 `None`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// 인증 게이트 미들웨어 함수.
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/api/me", get(me))
///     .layer(middleware::from_fn_with_state(gate, auth_gate));
/// ```
pub async fn auth_gate(
    State(gate): State<AuthGate>,
    mut request: Request,
    next: Next,
) -> Response {
    // 이번 요청에서 검증된 신원만 핸들러에 보이도록 기존 값 제거
    request.extensions_mut().remove::<AuthenticatedIdentity>();

    let path = request_path(request.uri(), request.extensions());

    match gate.evaluate(&path, request.headers()) {
        Ok(GateDecision::Public) => {
            record_gate_decision(GateOutcome::Public);
            next.run(request).await
        }
        Ok(GateDecision::Authenticated(identity)) => {
            record_gate_decision(GateOutcome::Authenticated);
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(error) => {
            record_gate_decision(match error {
                AuthError::AuthenticationRequired => GateOutcome::MissingToken,
                _ => GateOutcome::InvalidToken,
            });
            error.at(path).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{issue_token, Claims, Role};
    use axum::{
        body::Body,
        http::{HeaderValue, Request, StatusCode},
        middleware,
        routing::get,
        Extension, Router,
    };
    use leafy_core::AuthConfig;
    use tower::ServiceExt;

    const TEST_SECRET: &str = "gate-test-secret-value-with-enough-length-0001";

    fn gate() -> AuthGate {
        let settings = AuthConfig::with_secret(TEST_SECRET).validate().unwrap();
        AuthGate::new(Arc::new(settings))
    }

    async fn identity_handler(identity: Option<AuthenticatedIdentity>) -> String {
        identity.map(|i| i.id).unwrap_or_else(|| "anonymous".to_string())
    }

    fn app(gate: AuthGate) -> Router {
        Router::new()
            .route("/health", get(identity_handler))
            .route("/api/orders", get(identity_handler))
            .layer(middleware::from_fn_with_state(gate, auth_gate))
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(bearer_token(&headers), Some("abc"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwdw=="));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("bearer abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_evaluate_public_path_ignores_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer garbage"));
        assert_eq!(
            gate().evaluate("/health/ready", &headers),
            Ok(GateDecision::Public)
        );
    }

    #[tokio::test]
    async fn test_public_path_passthrough() {
        let response = app(gate())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "anonymous");
    }

    #[tokio::test]
    async fn test_missing_header_rejected() {
        let response = app(gate())
            .oneshot(Request::get("/api/orders").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_string(response).await;
        assert!(body.contains("Authentication required"));
        assert!(body.contains("/api/orders"));
    }

    #[tokio::test]
    async fn test_valid_token_attaches_identity() {
        let gate = gate();
        let claims = Claims::new("user-7", "u7@leafy.health", Role::User, None, 30);
        let token = issue_token(&claims, gate.settings()).unwrap();

        let response = app(gate)
            .oneshot(
                Request::get("/api/orders")
                    .header(AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "user-7");
    }

    #[tokio::test]
    async fn test_injected_identity_is_discarded() {
        // 게이트보다 바깥 레이어에서 넣은 신원은 공개 경로에서도 보이지 않아야 함
        let forged = AuthenticatedIdentity {
            id: "forged".to_string(),
            email: String::new(),
            role: Role::SuperAdmin,
            session_id: None,
        };
        let app = app(gate()).layer(Extension(forged));

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(body_string(response).await, "anonymous");
    }
}
