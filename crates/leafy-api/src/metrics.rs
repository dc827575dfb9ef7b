//! Prometheus 메트릭 설정 및 유틸리티.
//!
//! 인증 게이트의 판정 결과를 카운터로 수집하고 `/metrics` 엔드포인트로 노출합니다.
//! 레코더가 설치되지 않은 경우(테스트 등) 기록은 무시됩니다.

use metrics::counter;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Prometheus 메트릭 레코더를 설치하고 렌더링 핸들을 반환합니다.
///
/// # Errors
///
/// 전역 레코더가 이미 설치되어 있으면 에러를 반환합니다.
pub fn setup_metrics_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// 게이트/가드 판정 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// 공개 경로 통과
    Public,
    /// 토큰 검증 성공
    Authenticated,
    /// 헤더 없음 또는 형식 오류
    MissingToken,
    /// 토큰 검증 실패
    InvalidToken,
    /// 역할 불충분
    Forbidden,
}

impl GateOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            GateOutcome::Public => "public",
            GateOutcome::Authenticated => "authenticated",
            GateOutcome::MissingToken => "missing_token",
            GateOutcome::InvalidToken => "invalid_token",
            GateOutcome::Forbidden => "forbidden",
        }
    }
}

/// 판정 결과 카운터 증가.
pub fn record_gate_decision(outcome: GateOutcome) {
    counter!("auth_gate_decisions_total", "outcome" => outcome.as_str()).increment(1);
}
