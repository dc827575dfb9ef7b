//! LeafyHealth 서비스 공용 인증 계층.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - JWT Bearer 인증 게이트 (Axum 미들웨어)
//! - 역할 기반 가드
//! - 표준 인증 실패 응답
//! - 인증 판정 메트릭
//! - 참조 서비스 라우터
//!
//! # 모듈 구성
//!
//! - [`auth`]: 게이트, 가드, 신원, 토큰 검증
//! - [`error`]: 401/403 응답 본문
//! - [`metrics`]: Prometheus 메트릭
//! - [`routes`]: 참조 서비스 endpoint
//! - [`state`]: 애플리케이션 공유 상태

pub mod auth;
pub mod error;
pub mod metrics;
pub mod routes;
pub mod state;

pub use auth::{
    auth_gate, issue_token, require_roles, role_guard, AuthGate, AuthenticatedIdentity, Claims,
    Role, RoleGuard, TokenError, TokenVerifier,
};
pub use error::{AuthError, AuthErrorBody, AuthRejection};
pub use metrics::setup_metrics_recorder;
pub use routes::create_api_router;
pub use state::AppState;
