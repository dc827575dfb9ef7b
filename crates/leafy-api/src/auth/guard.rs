//! 역할 가드.
//!
//! 인증 게이트 다음 단계에서 신원의 역할이 허용 목록에 있는지 확인합니다.
//! 허용 목록이 비어 있으면 인증된 모든 신원을 허용합니다.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::{AuthenticatedIdentity, Role};
use crate::error::{request_path, AuthError};
use crate::metrics::{record_gate_decision, GateOutcome};

/// 허용 역할 집합.
///
/// ```rust,ignore
/// let admin = Router::new()
///     .route("/overview", get(overview))
///     .route_layer(middleware::from_fn_with_state(
///         RoleGuard::new([Role::Admin, Role::SuperAdmin]),
///         role_guard,
///     ));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleGuard {
    allowed: Vec<Role>,
}

impl RoleGuard {
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Self {
        let mut allowed: Vec<Role> = Vec::new();
        for role in roles {
            if !allowed.contains(&role) {
                allowed.push(role);
            }
        }
        Self { allowed }
    }

    /// 인증만 요구하는 가드.
    pub fn any_authenticated() -> Self {
        Self::default()
    }

    pub fn allowed(&self) -> &[Role] {
        &self.allowed
    }

    /// 역할 허용 여부.
    pub fn allows(&self, role: Role) -> bool {
        self.allowed.is_empty() || self.allowed.contains(&role)
    }

    /// 신원을 검사합니다. 신원이 없으면 401, 역할이 허용되지 않으면 403.
    pub fn check(&self, identity: Option<&AuthenticatedIdentity>) -> Result<(), AuthError> {
        let identity = identity.ok_or(AuthError::AuthenticationRequired)?;
        if self.allows(identity.role) {
            Ok(())
        } else {
            Err(AuthError::AccessDenied)
        }
    }
}

/// 핸들러 안에서 직접 역할을 검사할 때 사용합니다.
///
/// `roles`가 비어 있으면 항상 통과합니다.
pub fn require_roles(identity: &AuthenticatedIdentity, roles: &[Role]) -> Result<(), AuthError> {
    if roles.is_empty() || roles.contains(&identity.role) {
        Ok(())
    } else {
        Err(AuthError::AccessDenied)
    }
}

/// 역할 가드 미들웨어 함수.
///
/// 반드시 [`super::auth_gate`]보다 안쪽에 배치해야 합니다.
pub async fn role_guard(State(guard): State<RoleGuard>, request: Request, next: Next) -> Response {
    let identity = request.extensions().get::<AuthenticatedIdentity>();

    match guard.check(identity) {
        Ok(()) => next.run(request).await,
        Err(error) => {
            let path = request_path(request.uri(), request.extensions());
            match (error, identity) {
                (AuthError::AccessDenied, Some(identity)) => {
                    record_gate_decision(GateOutcome::Forbidden);
                    tracing::warn!(
                        path = %path,
                        user_id = %identity.id,
                        role = %identity.role,
                        "Access denied"
                    );
                }
                _ => {
                    record_gate_decision(GateOutcome::MissingToken);
                    tracing::warn!(path = %path, "Role guard reached without identity");
                }
            }
            error.at(path).into_response()
        }
    }
}
