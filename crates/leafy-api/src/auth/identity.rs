//! 요청 범위 인증 신원.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};

use super::Role;
use crate::error::{request_path, AuthError, AuthRejection};

/// 토큰 검증에 성공한 요청의 신원.
///
/// 인증 게이트가 request extensions에 넣고, 핸들러는 추출기로 꺼냅니다.
/// 같은 요청에서 검증이 성공하지 않았다면 extensions에 존재하지 않습니다.
///
/// ```rust,ignore
/// async fn me(identity: AuthenticatedIdentity) -> Json<AuthenticatedIdentity> {
///     Json(identity)
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedIdentity {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub session_id: Option<String>,
}

impl<S> FromRequestParts<S> for AuthenticatedIdentity
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedIdentity>()
            .cloned()
            .ok_or_else(|| {
                AuthRejection::new(
                    AuthError::AuthenticationRequired,
                    request_path(&parts.uri, &parts.extensions),
                )
            })
    }
}

/// 공개 경로 핸들러용 선택적 추출.
impl<S> OptionalFromRequestParts<S> for AuthenticatedIdentity
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<AuthenticatedIdentity>().cloned())
    }
}
