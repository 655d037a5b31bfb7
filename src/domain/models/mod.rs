//! # Domain Models Module
//!
//! 검증 흐름에서 오가는 값 객체들을 정의합니다.
//!
//! - [`profile`] - 외부 신원 프로필과 저장용 프로바이더 데이터
//! - [`request_context`] - 호스트가 넘기는 요청 컨텍스트
//! - [`verification`] - 세 갈래 검증 결과 (`Ok(Some)` / `Ok(None)` / `Err`)

pub mod profile;
pub mod request_context;
pub mod verification;

pub use profile::*;
pub use request_context::*;
pub use verification::*;
