//! 인증 및 권한 부여.
//!
//! 모든 LeafyHealth 서비스가 공유하는 JWT 인증 게이트와 역할 가드입니다.
//!
//! # 구성 요소
//!
//! - [`AuthGate`] / [`auth_gate`]: Bearer 토큰 검증 미들웨어
//! - [`RoleGuard`] / [`role_guard`]: 허용 역할 검사 미들웨어
//! - [`AuthenticatedIdentity`]: 요청 범위 신원 및 추출기
//! - [`Claims`] / [`TokenVerifier`]: 토큰 디코딩과 검증
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! let gate = AuthGate::new(Arc::new(config.auth.validate()?));
//!
//! let admin = Router::new()
//!     .route("/overview", get(overview))
//!     .route_layer(middleware::from_fn_with_state(
//!         RoleGuard::new([Role::Admin, Role::SuperAdmin]),
//!         role_guard,
//!     ));
//!
//! let app = Router::new()
//!     .route("/health", get(health))
//!     .nest("/admin", admin)
//!     .layer(middleware::from_fn_with_state(gate, auth_gate));
//! ```

mod claims;
mod guard;
mod identity;
mod middleware;
mod roles;

pub use claims::{issue_token, Claims, TokenError, TokenVerifier};
pub use guard::{require_roles, role_guard, RoleGuard};
pub use identity::AuthenticatedIdentity;
pub use middleware::{auth_gate, bearer_token, AuthGate, GateDecision};
pub use roles::Role;
