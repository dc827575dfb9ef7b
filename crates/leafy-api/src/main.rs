//! LeafyHealth 참조 API 서버.
//!
//! 공용 인증 게이트를 적용한 최소 서비스를 시작합니다. 각 마이크로서비스는
//! 같은 순서(설정 로드 → 시크릿 검증 → 게이트 구성)로 부팅합니다.

use std::sync::Arc;

use anyhow::Context;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use leafy_api::{create_api_router, setup_metrics_recorder, AppState};
use leafy_core::{init_logging, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (없어도 무시)
    let _ = dotenvy::dotenv();

    let config = AppConfig::load_default().context("failed to load configuration")?;
    init_logging(&config.logging).map_err(|e| anyhow::anyhow!(e))?;

    info!("Starting LeafyHealth API server...");

    // 약한 시크릿으로는 절대 요청을 받지 않음
    let settings = match config.auth.validate() {
        Ok(settings) => Arc::new(settings),
        Err(e) => {
            error!(error = %e, "Invalid auth configuration, refusing to start");
            return Err(e.into());
        }
    };
    info!(
        public_paths = ?settings.public_paths(),
        leeway_secs = settings.leeway_secs(),
        "Auth gate configured"
    );

    let mut state = AppState::new(settings);
    match setup_metrics_recorder() {
        Ok(handle) => state = state.with_metrics(handle),
        Err(e) => warn!(error = %e, "Prometheus recorder unavailable, /metrics disabled"),
    }

    let app = create_api_router(state).layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(%addr, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");

    Ok(())
}

/// Ctrl+C 또는 SIGTERM 대기.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
