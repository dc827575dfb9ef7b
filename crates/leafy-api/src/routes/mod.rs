//! API 라우트.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (공개)
//! - `/metrics` - Prometheus 메트릭 (공개)
//! - `/api/me` - 현재 신원 (인증된 모든 역할)
//! - `/api/admin/overview` - 관리자 개요 (admin, super-admin)

pub mod health;
pub mod profile;

use axum::{middleware, routing::get, Router};

use crate::auth::{auth_gate, role_guard, Role, RoleGuard};
use crate::state::AppState;

pub use health::{health_check, metrics_endpoint, HealthResponse};
pub use profile::{admin_overview, current_identity, AdminOverviewResponse};

/// 관리자 라우트 허용 역할.
pub const ADMIN_ROLES: [Role; 2] = [Role::Admin, Role::SuperAdmin];

/// 전체 라우터 생성.
///
/// 인증 게이트는 모든 라우트를 감싸고, 관리자 라우트에는 역할 가드가 추가됩니다.
pub fn create_api_router(state: AppState) -> Router {
    let admin = Router::new()
        .route("/overview", get(admin_overview))
        .route_layer(middleware::from_fn_with_state(
            RoleGuard::new(ADMIN_ROLES),
            role_guard,
        ));

    let me = Router::new()
        .route("/me", get(current_identity))
        .route_layer(middleware::from_fn_with_state(
            RoleGuard::any_authenticated(),
            role_guard,
        ));

    let api = Router::new().merge(me).nest("/admin", admin);

    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_endpoint))
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(
            state.gate.clone(),
            auth_gate,
        ))
        .with_state(state)
}
