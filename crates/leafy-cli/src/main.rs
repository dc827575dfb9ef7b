//! LeafyHealth 운영 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 현재 환경의 인증 설정 점검 (서비스가 시작을 거부할 설정이면 실패)
//! leafy check-config
//!
//! # 관리자 개발 토큰 발급
//! leafy issue-token --user-id 42 --email ops@leafy.health --role admin
//!
//! # 토큰 검사
//! leafy inspect-token "Bearer eyJhbGciOi..."
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::error;

use leafy_api::Role;
use leafy_cli::commands::check_config::check_config;
use leafy_cli::commands::token::{inspect, issue, InspectReport, IssueRequest};
use leafy_core::{init_logging, AppConfig, LogFormat, LoggingConfig};

#[derive(Parser)]
#[command(name = "leafy")]
#[command(about = "LeafyHealth auth tooling - 설정 점검 및 개발용 토큰", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로
    #[arg(short, long, global = true, default_value = "config/default.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 인증 설정 검증 (시크릿은 출력하지 않음)
    CheckConfig,

    /// 개발용 액세스 토큰 발급
    IssueToken {
        /// 사용자 ID
        #[arg(long)]
        user_id: String,

        /// 이메일
        #[arg(long)]
        email: String,

        /// 역할 (user, admin, super-admin)
        #[arg(long, default_value = "user")]
        role: Role,

        /// 세션 ID (기본: 자동 생성)
        #[arg(long)]
        session_id: Option<String>,

        /// 만료 시간 (분)
        #[arg(long, default_value = "60")]
        ttl_minutes: i64,
    },

    /// 토큰 서명/만료 검사
    InspectToken {
        /// JWT 문자열 (`Bearer ` 접두사 허용)
        token: String,
    },
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let logging = LoggingConfig {
        level: "warn".to_string(),
        format: LogFormat::Compact,
    };
    init_logging(&logging).map_err(|e| anyhow::anyhow!(e))?;

    let config = AppConfig::load(&cli.config).context("failed to load configuration")?;

    match cli.command {
        Commands::CheckConfig => {
            let report = check_config(&config).inspect_err(|e| {
                error!(error = %e, "Auth configuration rejected");
            })?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Commands::IssueToken {
            user_id,
            email,
            role,
            session_id,
            ttl_minutes,
        } => {
            let settings = config.auth.validate()?;
            let token = issue(
                IssueRequest {
                    user_id,
                    email,
                    role,
                    session_id,
                    ttl_minutes,
                },
                &settings,
            )?;
            println!("{token}");
        }

        Commands::InspectToken { token } => {
            let settings = config.auth.validate()?;
            let report = inspect(&token, &settings);
            println!("{}", serde_json::to_string_pretty(&report)?);
            if matches!(report, InspectReport::Invalid { .. }) {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
