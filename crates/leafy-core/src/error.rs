//! 서비스 시작 단계의 에러 타입.
//!
//! 설정 에러는 모두 치명적입니다. 이 에러가 발생하면 프로세스는
//! 요청을 받기 전에 종료되어야 합니다.

use thiserror::Error;

/// 설정 로드 및 검증 에러.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 설정 소스(파일, 환경 변수) 로드 또는 역직렬화 실패
    #[error("설정 로드 실패: {0}")]
    Load(#[from] config::ConfigError),

    /// JWT 시크릿이 설정되지 않음
    #[error("JWT_SECRET이 설정되지 않았습니다")]
    MissingSecret,

    /// JWT 시크릿이 최소 길이보다 짧음
    #[error("JWT_SECRET이 너무 짧습니다: {length}자 (최소 {minimum}자)")]
    WeakSecret {
        /// 실제 길이 (문자 수)
        length: usize,
        /// 요구되는 최소 길이
        minimum: usize,
    },

    /// 알려진 기본값/예제 시크릿 사용
    #[error("JWT_SECRET이 알려진 기본값입니다. 고유한 시크릿을 생성하세요")]
    DefaultSecret,

    /// 잘못된 설정 값
    #[error("잘못된 설정 값 ({key}): {message}")]
    InvalidValue {
        /// 설정 키
        key: String,
        /// 상세 메시지
        message: String,
    },
}

/// 설정 작업을 위한 Result 타입.
pub type ConfigResult<T> = Result<T, ConfigError>;
