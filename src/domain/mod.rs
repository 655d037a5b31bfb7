//! # Domain Layer
//!
//! 신원 확인 흐름의 도메인 타입을 모아 둔 계층입니다.
//!
//! ```text
//! Domain Layer
//! ├── entities/     ← 로컬 엔티티, 저장소 레코드, 조회 결과 정규화
//! └── models/       ← 신원 프로필, 요청 컨텍스트, 검증 결과
//! ```

pub mod entities;
pub mod models;

pub use entities::*;
pub use models::*;
