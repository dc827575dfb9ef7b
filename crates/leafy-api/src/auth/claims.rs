//! JWT 클레임 디코딩/검증.
//!
//! 토큰은 로그인 서비스(외부)가 HS256으로 발급합니다. 이 모듈은 토큰을
//! 한 번의 디코딩 단계로 [`Claims`]로 변환하고, 정해진 우선순위 규칙에 따라
//! [`AuthenticatedIdentity`]를 만듭니다.
//!
//! # 사용자 ID 우선순위
//!
//! `userId` → `id` → `sub`. 비어 있지 않은 첫 번째 값을 사용하며,
//! 셋 다 없으면 토큰은 유효하지 않습니다.
//!
//! ID는 문자열 또는 정수(`i64`/`u64` 범위)를 허용합니다. 소수 ID는 거부됩니다.
//!
//! `aud`, `iss` 같은 등록 클레임은 검사하지 않습니다. 서명과 만료만 검증합니다.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use leafy_core::AuthSettings;
use serde::{Deserialize, Deserializer, Serialize};

use super::{AuthenticatedIdentity, Role};

/// JWT 페이로드.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject
    #[serde(
        default,
        deserialize_with = "deserialize_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub sub: Option<String>,
    /// 사용자 ID (최우선)
    #[serde(
        rename = "userId",
        default,
        deserialize_with = "deserialize_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_id: Option<String>,
    /// 사용자 ID (구 버전 토큰)
    #[serde(
        default,
        deserialize_with = "deserialize_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// 이메일
    #[serde(default)]
    pub email: String,
    /// 역할
    #[serde(default)]
    pub role: Role,
    /// 세션 ID
    #[serde(rename = "sessionId", default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Issued At (Unix timestamp)
    #[serde(default)]
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// 문자열 또는 정수 ID를 문자열로 통일.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
        RawId::Text(s) => s,
        RawId::Signed(n) => n.to_string(),
        RawId::Unsigned(n) => n.to_string(),
    }))
}

impl Claims {
    /// 새 Claims 생성 (개발/테스트용 발급).
    ///
    /// `userId`와 `sub`에 같은 값을 기록합니다.
    pub fn new(
        user_id: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        session_id: Option<String>,
        expires_in_minutes: i64,
    ) -> Self {
        let user_id = user_id.into();
        let now = Utc::now();
        Self {
            sub: Some(user_id.clone()),
            user_id: Some(user_id),
            id: None,
            email: email.into(),
            role,
            session_id,
            iat: now.timestamp(),
            exp: (now + Duration::minutes(expires_in_minutes)).timestamp(),
        }
    }

    /// 우선순위 규칙에 따른 사용자 ID.
    pub fn subject(&self) -> Option<&str> {
        [&self.user_id, &self.id, &self.sub]
            .into_iter()
            .filter_map(|v| v.as_deref())
            .find(|v| !v.trim().is_empty())
    }

    /// 인증된 신원으로 변환.
    pub fn into_identity(self) -> Result<AuthenticatedIdentity, TokenError> {
        let id = self.subject().ok_or(TokenError::MissingSubject)?.to_string();
        Ok(AuthenticatedIdentity {
            id,
            email: self.email,
            role: self.role,
            session_id: self.session_id,
        })
    }
}

/// 토큰 처리 에러.
///
/// 게이트에서는 모두 401 InvalidToken으로 응답하며, 구분은 로그용입니다.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("토큰이 만료되었습니다")]
    Expired,
    #[error("서명이 일치하지 않습니다")]
    BadSignature,
    #[error("잘못된 토큰 형식: {0}")]
    Malformed(String),
    #[error("사용자 식별자 클레임이 없습니다")]
    MissingSubject,
    #[error("토큰 인코딩 실패: {0}")]
    Encoding(#[source] jsonwebtoken::errors::Error),
}

impl TokenError {
    /// 로그 필드용 짧은 사유.
    pub fn reason(&self) -> &'static str {
        match self {
            TokenError::Expired => "expired",
            TokenError::BadSignature => "bad_signature",
            TokenError::Malformed(_) => "malformed",
            TokenError::MissingSubject => "missing_subject",
            TokenError::Encoding(_) => "encoding",
        }
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            _ => TokenError::Malformed(e.to_string()),
        }
    }
}

/// 토큰 검증기.
///
/// 시작 시 한 번 만들어 공유합니다. 검증은 동기 CPU 작업이며 I/O가 없습니다.
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(settings: &AuthSettings) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = settings.leeway_secs();
        validation.validate_exp = true;
        validation.validate_aud = false;

        Self {
            key: DecodingKey::from_secret(settings.secret_bytes()),
            validation,
        }
    }

    /// 토큰을 디코딩하고 서명과 만료를 검증합니다.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        Ok(decode::<Claims>(token, &self.key, &self.validation)?.claims)
    }

    /// 토큰을 검증하고 인증된 신원을 반환합니다.
    pub fn verify(&self, token: &str) -> Result<AuthenticatedIdentity, TokenError> {
        self.decode(token)?.into_identity()
    }
}

/// HS256 토큰 발급.
///
/// 운영 환경의 발급은 로그인 서비스가 담당합니다. 이 함수는 CLI와 테스트에서
/// 같은 시크릿으로 토큰을 만들 때 사용합니다.
pub fn issue_token(claims: &Claims, settings: &AuthSettings) -> Result<String, TokenError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(settings.secret_bytes()),
    )
    .map_err(TokenError::Encoding)
}
