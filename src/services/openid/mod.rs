//! # OpenID 인증 서비스
//!
//! 외부 OpenID 스트래티지를 호스트 애플리케이션에 연결하고,
//! 핸드셰이크 결과를 로컬 엔티티로 확정합니다.
//!
//! - [`plugin`] - 설정 해석과 활성화 (스트래티지 등록)
//! - [`verifier`] - 찾기 / 만들기 / 연동 검증기
//! - [`strategy`] - 외부 스트래티지 연동 trait
//! - [`replay`] - 기록된 프로필을 재생하는 스트래티지

pub mod plugin;
pub mod replay;
pub mod strategy;
pub mod verifier;

pub use plugin::*;
pub use replay::*;
pub use strategy::*;
pub use verifier::*;
