//! 인증 설정 점검.
//!
//! 배포 전에 서비스가 시작 단계에서 거부할 설정인지 미리 확인합니다.

use leafy_core::{AppConfig, ConfigResult};
use serde::Serialize;

/// 점검 결과 요약 (시크릿 값은 포함하지 않음).
#[derive(Debug, Serialize)]
pub struct ConfigReport {
    pub listen_addr: String,
    pub secret_length: usize,
    pub public_paths: Vec<String>,
    pub leeway_secs: u64,
    pub log_level: String,
}

/// 설정을 검증하고 요약을 만듭니다.
pub fn check_config(config: &AppConfig) -> ConfigResult<ConfigReport> {
    let settings = config.auth.validate()?;
    let listen_addr = config.server.socket_addr()?;

    Ok(ConfigReport {
        listen_addr: listen_addr.to_string(),
        secret_length: config
            .auth
            .jwt_secret
            .as_deref()
            .map(|s| s.chars().count())
            .unwrap_or_default(),
        public_paths: settings.public_paths().to_vec(),
        leeway_secs: settings.leeway_secs(),
        log_level: config.logging.level.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use leafy_core::{AuthConfig, ConfigError, LoggingConfig, ServerConfig};

    fn config(secret: Option<&str>) -> AppConfig {
        AppConfig {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            auth: AuthConfig {
                jwt_secret: secret.map(str::to_string),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_report_hides_secret() {
        let secret = "cli-check-secret-0123456789abcdefghij";
        let report = check_config(&config(Some(secret))).unwrap();

        assert_eq!(report.secret_length, secret.len());
        assert_eq!(report.listen_addr, "0.0.0.0:3000");
        assert!(!serde_json::to_string(&report).unwrap().contains(secret));
    }

    #[test]
    fn test_missing_secret_fails() {
        assert!(matches!(
            check_config(&config(None)),
            Err(ConfigError::MissingSecret)
        ));
    }
}
