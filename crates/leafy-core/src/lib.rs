//! # Leafy Core
//!
//! LeafyHealth 백엔드 서비스가 공유하는 기반 모듈입니다.
//!
//! - 설정 로드 및 인증 시크릿 검증
//! - 로깅 인프라
//! - 시작 단계 에러 타입

pub mod config;
pub mod error;
pub mod logging;

pub use config::{
    is_known_insecure_secret, AppConfig, AuthConfig, AuthSettings, LoggingConfig, ServerConfig,
    DEFAULT_PUBLIC_PATHS, KNOWN_INSECURE_SECRETS, MIN_SECRET_LENGTH,
};
pub use error::{ConfigError, ConfigResult};
pub use logging::{init_logging, LogFormat};
