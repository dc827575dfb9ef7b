//! 인증 실패 응답.
//!
//! 인증 게이트, 역할 가드, 신원 추출기는 모두 같은 형식으로 실패를 응답합니다.
//!
//! # 예시
//!
//! ```json
//! {
//!   "statusCode": 401,
//!   "message": "Authentication required",
//!   "timestamp": "2026-10-18T09:30:00.000Z",
//!   "path": "/api/orders"
//! }
//! ```

use axum::extract::OriginalUri;
use axum::http::{Extensions, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// 요청 단위 인증/인가 에러.
///
/// 모두 해당 요청에 대해 최종적이며 재시도하지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Authorization 헤더가 없거나 `Bearer <token>` 형식이 아님 (401)
    #[error("Authentication required")]
    AuthenticationRequired,
    /// 서명 불일치, 형식 오류, 만료 (401)
    #[error("Invalid or expired authentication token")]
    InvalidToken,
    /// 인증은 되었으나 역할이 허용 목록에 없음 (403)
    #[error("Access denied: insufficient permissions")]
    AccessDenied,
}

impl AuthError {
    /// HTTP 상태 코드.
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::AuthenticationRequired | AuthError::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::AccessDenied => StatusCode::FORBIDDEN,
        }
    }

    /// 요청 경로를 붙여 응답 가능한 거부로 변환.
    pub fn at(self, path: impl Into<String>) -> AuthRejection {
        AuthRejection::new(self, path)
    }
}

/// 실패 응답 본문.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthErrorBody {
    /// HTTP 상태 코드
    pub status_code: u16,
    /// 에러 메시지
    pub message: String,
    /// 발생 시각 (ISO 8601, UTC)
    pub timestamp: String,
    /// 요청 경로
    pub path: String,
}

/// 경로가 포함된 인증 거부.
#[derive(Debug, Clone)]
pub struct AuthRejection {
    pub error: AuthError,
    pub path: String,
}

impl AuthRejection {
    pub fn new(error: AuthError, path: impl Into<String>) -> Self {
        Self {
            error,
            path: path.into(),
        }
    }

    /// 응답 본문 생성 (타임스탬프는 호출 시점).
    pub fn body(&self) -> AuthErrorBody {
        AuthErrorBody {
            status_code: self.error.status().as_u16(),
            message: self.error.to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            path: self.path.clone(),
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (self.error.status(), Json(self.body())).into_response()
    }
}

/// 에러 본문에 기록할 요청 경로.
///
/// 중첩 라우터 안에서도 원래 경로를 쓰도록 `OriginalUri`를 우선합니다.
pub fn request_path(uri: &Uri, extensions: &Extensions) -> String {
    extensions
        .get::<OriginalUri>()
        .map(|original| original.0.path())
        .unwrap_or_else(|| uri.path())
        .to_string()
}
