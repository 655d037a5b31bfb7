//! # Configuration Module
//!
//! OpenID 인증 백엔드의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 호스트 설정과, 계층형 OpenID 스트래티지 설정을 다룹니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버 호스트/포트, 콜백 URL 생성
//! - [`auth_config`] - 호스트 애플리케이션의 전역 인증 설정
//! - [`openid_config`] - 네 계층 설정 병합과 검증 (`resolve`)
//!
//! ## 설계 원칙
//!
//! ### 1. 활성화 시점 검증
//!
//! 설정 오류는 요청 처리 중이 아니라 스트래티지 활성화 전에 드러나야 합니다.
//! 필수 값(name, Strategy, apiKey, realm)이 빠지면 `ConfigError` 로 즉시 실패합니다.
//!
//! ### 2. 결정적 병합
//!
//! 같은 입력 계층은 항상 같은 유효 설정을 만듭니다.
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버 주소 (returnURL 생성에 사용)
//! export HOST="localhost"
//! export PORT="3030"
//! export ENVIRONMENT="development"
//!
//! # 전역 인증 설정
//! export AUTH_SETTINGS_FILE="config/authentication.json"
//! ```

pub mod data_config;
pub mod auth_config;
pub mod openid_config;

pub use data_config::*;
pub use auth_config::*;
pub use openid_config::*;
