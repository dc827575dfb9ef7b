//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! 시작 시점에 한 번 만들어지며 이후 변경되지 않습니다.

use std::sync::Arc;

use leafy_core::AuthSettings;
use metrics_exporter_prometheus::PrometheusHandle;

use crate::auth::AuthGate;

/// 애플리케이션 공유 상태.
#[derive(Clone)]
pub struct AppState {
    /// 인증 게이트 (검증된 설정 + 토큰 검증기)
    pub gate: AuthGate,

    /// Prometheus 렌더링 핸들 (레코더 미설치 시 None)
    pub metrics: Option<PrometheusHandle>,

    /// 서버 시작 시간 (업타임 계산용)
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// 서비스 버전
    pub version: String,
}

impl AppState {
    pub fn new(settings: Arc<AuthSettings>) -> Self {
        Self {
            gate: AuthGate::new(settings),
            metrics: None,
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 메트릭 핸들 설정.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// 서버 업타임(초).
    pub fn uptime_secs(&self) -> i64 {
        (chrono::Utc::now() - self.started_at).num_seconds()
    }
}
