//! 설정 관리.
//!
//! 서비스 설정을 정의하고 로드합니다. 인증 설정은 시작 시점에
//! [`AuthConfig::validate`]로 검증되어 불변의 [`AuthSettings`]가 되며,
//! 이후 요청 처리 중에는 읽기 전용으로만 공유됩니다.
//!
//! # 로드 순서 (뒤로 갈수록 우선)
//!
//! 1. 내장 기본값
//! 2. 설정 파일 (`config/default.toml`, 선택)
//! 3. `LEAFY__` 접두사 환경 변수 (예: `LEAFY__AUTH__LEEWAY_SECS=5`)
//! 4. 서비스 공통 환경 변수 (`JWT_SECRET`, `AUTH_PUBLIC_PATHS`, `API_HOST` 등)

use std::net::SocketAddr;
use std::path::Path;

use config::builder::DefaultState;
use config::ConfigBuilder;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::logging::LogFormat;

/// JWT 시크릿 최소 길이 (문자 수).
pub const MIN_SECRET_LENGTH: usize = 32;

/// 예제 코드나 `.env.example`에 자주 등장하는 시크릿 값.
///
/// 길이 조건을 만족하더라도 이 값들은 거부됩니다. 비교는 앞뒤 공백을
/// 제거한 뒤 대소문자를 구분하지 않습니다.
pub const KNOWN_INSECURE_SECRETS: &[&str] = &[
    "secret",
    "changeme",
    "change-me",
    "jwt-secret",
    "jwt_secret",
    "supersecret",
    "your-secret-key",
    "your_jwt_secret",
    "default-secret",
    "development-secret-key-change-in-production",
    "your-super-secret-jwt-key-change-in-production",
    "your-super-secret-jwt-key-change-this-in-production",
    "your-256-bit-secret-change-me-in-production-please",
    "leafyhealth-jwt-secret-key-change-in-production",
    "leafyhealth-super-secret-key-for-development-only",
];

/// 인증 없이 통과시키는 기본 경로 (헬스 체크, API 문서, 인트로스펙션).
pub const DEFAULT_PUBLIC_PATHS: &[&str] = &[
    "/health",
    "/api-docs",
    "/swagger-ui",
    "/docs",
    "/metrics",
    "/graphql",
];

/// 애플리케이션 설정.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 인증 설정
    #[serde(default)]
    pub auth: AuthConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// 소켓 주소 반환.
    ///
    /// # Errors
    /// `host:port` 형식이 유효하지 않으면 [`ConfigError::InvalidValue`]를 반환합니다.
    pub fn socket_addr(&self) -> ConfigResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
                key: "server.host".to_string(),
                message: e.to_string(),
            })
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨 필터 (예: "info", "leafy_api=debug")
    pub level: String,
    /// 로그 형식
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// 인증 게이트 설정 (검증 전 원본 값).
///
/// `Debug` 출력에서 시크릿은 가려집니다.
#[derive(Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC 서명용 공유 시크릿
    #[serde(default)]
    pub jwt_secret: Option<String>,
    /// 인증을 건너뛰는 경로 조각. 요청 경로가 이 중 하나를 포함하면 공개 경로입니다.
    #[serde(default = "default_public_paths")]
    pub public_paths: Vec<String>,
    /// 만료 시간 검증 허용 오차 (초)
    #[serde(default)]
    pub leeway_secs: u64,
}

fn default_public_paths() -> Vec<String> {
    DEFAULT_PUBLIC_PATHS.iter().map(|p| p.to_string()).collect()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            public_paths: default_public_paths(),
            leeway_secs: 0,
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "[REDACTED]"))
            .field("public_paths", &self.public_paths)
            .field("leeway_secs", &self.leeway_secs)
            .finish()
    }
}

impl AuthConfig {
    /// 주어진 시크릿과 기본 공개 경로로 설정 생성.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: Some(secret.into()),
            ..Default::default()
        }
    }

    /// 공개 경로 목록 교체.
    #[must_use]
    pub fn with_public_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.public_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// 설정을 검증하고 불변 [`AuthSettings`]로 변환합니다.
    ///
    /// # Errors
    ///
    /// - 시크릿이 없거나 공백뿐이면 [`ConfigError::MissingSecret`]
    /// - [`MIN_SECRET_LENGTH`]자 미만이면 [`ConfigError::WeakSecret`]
    /// - [`KNOWN_INSECURE_SECRETS`]에 포함되면 [`ConfigError::DefaultSecret`]
    pub fn validate(&self) -> ConfigResult<AuthSettings> {
        let secret = match self.jwt_secret.as_deref() {
            Some(s) if !s.trim().is_empty() => s,
            _ => return Err(ConfigError::MissingSecret),
        };

        let length = secret.chars().count();
        if length < MIN_SECRET_LENGTH {
            return Err(ConfigError::WeakSecret {
                length,
                minimum: MIN_SECRET_LENGTH,
            });
        }

        if is_known_insecure_secret(secret) {
            return Err(ConfigError::DefaultSecret);
        }

        // 빈 조각은 모든 경로와 매칭되므로 제거
        let public_paths = self
            .public_paths
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();

        Ok(AuthSettings {
            secret: SecretString::new(secret.into()),
            public_paths,
            leeway_secs: self.leeway_secs,
        })
    }
}

/// 알려진 기본값 시크릿인지 확인.
pub fn is_known_insecure_secret(secret: &str) -> bool {
    let normalized = secret.trim().to_lowercase();
    KNOWN_INSECURE_SECRETS.iter().any(|known| *known == normalized)
}

/// 검증된 인증 설정.
///
/// 프로세스 시작 시 한 번 생성되어 `Arc`로 공유됩니다.
pub struct AuthSettings {
    secret: SecretString,
    public_paths: Vec<String>,
    leeway_secs: u64,
}

impl AuthSettings {
    /// 공유 시크릿.
    pub fn secret(&self) -> &SecretString {
        &self.secret
    }

    /// 공개 경로 조각 목록.
    pub fn public_paths(&self) -> &[String] {
        &self.public_paths
    }

    /// 만료 검증 허용 오차 (초).
    pub fn leeway_secs(&self) -> u64 {
        self.leeway_secs
    }

    /// 요청 경로가 공개 경로인지 확인 (부분 문자열 매칭).
    pub fn is_public_path(&self, path: &str) -> bool {
        self.public_paths.iter().any(|p| path.contains(p.as_str()))
    }

    /// 시크릿 바이트 (서명/검증 키 생성용).
    pub fn secret_bytes(&self) -> &[u8] {
        self.secret.expose_secret().as_bytes()
    }
}

impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings")
            .field("secret", &"[REDACTED]")
            .field("public_paths", &self.public_paths)
            .field("leeway_secs", &self.leeway_secs)
            .finish()
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없어도 에러가 아닙니다.
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let builder = Self::defaults()?
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("LEAFY")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("auth.public_paths"),
            );

        let builder = apply_service_env(builder, |key| std::env::var(key).ok())?;
        Self::from_builder(builder)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> ConfigResult<Self> {
        Self::load("config/default.toml")
    }

    /// 내장 기본값만 채운 빌더.
    pub fn defaults() -> ConfigResult<ConfigBuilder<DefaultState>> {
        Ok(config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            .set_default("auth.public_paths", default_public_paths())?
            .set_default("auth.leeway_secs", 0)?)
    }

    /// 빌더를 실행해 설정을 역직렬화합니다.
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> ConfigResult<Self> {
        Ok(builder.build()?.try_deserialize()?)
    }
}

/// 서비스 공통 환경 변수를 설정 키에 덮어씁니다.
///
/// 모든 마이크로서비스가 같은 이름의 변수를 사용하므로 `LEAFY__` 접두사 없이도
/// 인식합니다. `lookup`은 테스트에서 환경을 대체할 수 있도록 주입받습니다.
pub fn apply_service_env<F>(
    builder: ConfigBuilder<DefaultState>,
    lookup: F,
) -> ConfigResult<ConfigBuilder<DefaultState>>
where
    F: Fn(&str) -> Option<String>,
{
    let public_paths = lookup("AUTH_PUBLIC_PATHS").map(|raw| {
        raw.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
    });

    Ok(builder
        .set_override_option("auth.jwt_secret", lookup("JWT_SECRET"))?
        .set_override_option("auth.public_paths", public_paths)?
        .set_override_option("auth.leeway_secs", lookup("AUTH_LEEWAY_SECS"))?
        .set_override_option("server.host", lookup("API_HOST"))?
        .set_override_option("server.port", lookup("API_PORT"))?
        .set_override_option("logging.level", lookup("RUST_LOG"))?
        .set_override_option("logging.format", lookup("LOG_FORMAT"))?)
}
