//! # Core Module
//!
//! 호스트 애플리케이션 모델과 공통 기반 기능을 제공합니다.
//!
//! ## 모듈 구성
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 요청 처리 중 발생하는 런타임 에러 (Actix-Web `ResponseError` 구현)
//! - **ConfigError**: 설정 해석/활성화 단계의 에러
//! - **StoreError**: 엔티티 저장소 연산 에러
//!
//! ### [`registry`] - 이름 기반 레지스트리
//! - **ServiceRegistry**: 서비스 경로 → 엔티티 저장소
//! - **StrategyRegistry**: 프로바이더 이름 → 스트래티지 + 유효 설정
//!
//! ### [`application`] - 호스트 애플리케이션
//! - **AuthApp**: 인증 설정, 호스트 정보, 두 레지스트리를 소유

pub mod application;
pub mod errors;
pub mod registry;

pub use application::*;
pub use errors::*;
pub use registry::*;
