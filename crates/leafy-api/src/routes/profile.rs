//! 인증이 필요한 참조 endpoint.
//!
//! 게이트가 붙인 신원이 핸들러까지 전달되는지 확인하는 용도입니다.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::auth::{AuthenticatedIdentity, Role};
use crate::state::AppState;

/// GET /api/me
///
/// 현재 요청의 신원을 그대로 반환합니다.
pub async fn current_identity(identity: AuthenticatedIdentity) -> Json<AuthenticatedIdentity> {
    Json(identity)
}

/// 관리자 개요 응답.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverviewResponse {
    pub viewer: AuthenticatedIdentity,
    pub version: String,
    pub uptime_secs: i64,
    pub public_paths: Vec<String>,
    pub admin_roles: Vec<Role>,
}

/// GET /api/admin/overview
pub async fn admin_overview(
    State(state): State<AppState>,
    identity: AuthenticatedIdentity,
) -> Json<AdminOverviewResponse> {
    Json(AdminOverviewResponse {
        viewer: identity,
        version: state.version.clone(),
        uptime_secs: state.uptime_secs(),
        public_paths: state.gate.settings().public_paths().to_vec(),
        admin_roles: super::ADMIN_ROLES.to_vec(),
    })
}
