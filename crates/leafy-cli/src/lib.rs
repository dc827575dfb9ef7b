//! LeafyHealth 운영 도구 모음.
//!
//! - 인증 설정 점검
//! - 개발용 토큰 발급/검사

pub mod commands;
