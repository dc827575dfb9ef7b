//! 개발용 토큰 발급 및 검사.
//!
//! 운영 토큰은 로그인 서비스가 발급합니다. 여기서 발급한 토큰은 로컬 개발과
//! 스테이징 점검용입니다.

use leafy_api::{issue_token, AuthenticatedIdentity, Claims, Role, TokenError, TokenVerifier};
use leafy_core::AuthSettings;
use serde::Serialize;

/// 토큰 발급 요청.
#[derive(Debug, Clone)]
pub struct IssueRequest {
    pub user_id: String,
    pub email: String,
    pub role: Role,
    pub session_id: Option<String>,
    pub ttl_minutes: i64,
}

/// 토큰 발급. 세션 ID가 없으면 새로 생성합니다.
pub fn issue(request: IssueRequest, settings: &AuthSettings) -> Result<String, TokenError> {
    let session_id = request
        .session_id
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let claims = Claims::new(
        request.user_id,
        request.email,
        request.role,
        Some(session_id),
        request.ttl_minutes,
    );
    issue_token(&claims, settings)
}

/// 토큰 검사 결과.
#[derive(Debug, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum InspectReport {
    Valid {
        identity: AuthenticatedIdentity,
        expires_at: i64,
    },
    Invalid {
        reason: String,
        message: String,
    },
}

/// 게이트와 같은 검증기로 토큰을 검사합니다.
pub fn inspect(token: &str, settings: &AuthSettings) -> InspectReport {
    let verifier = TokenVerifier::new(settings);
    let token = token.trim().trim_start_matches("Bearer ").trim();

    match verifier.decode(token).and_then(|claims| {
        let expires_at = claims.exp;
        claims.into_identity().map(|identity| (identity, expires_at))
    }) {
        Ok((identity, expires_at)) => InspectReport::Valid {
            identity,
            expires_at,
        },
        Err(e) => InspectReport::Invalid {
            reason: e.reason().to_string(),
            message: e.to_string(),
        },
    }
}
