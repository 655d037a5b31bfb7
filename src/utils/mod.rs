//! 공통 유틸리티 함수 모듈
//!
//! 애플리케이션 전체에서 사용되는 공통 유틸리티 함수들을 제공합니다.
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 정리, 경로 정규화
//! - [`json_utils`] - JSON 깊은 병합, 참/거짓 판정
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::utils::json_utils::deep_merge;
//! use crate::utils::string_utils::strip_slashes;
//!
//! deep_merge(&mut settings, &provider_block);
//! let url = format!("http://localhost:3030/{}", strip_slashes("/auth/steam/return"));
//! ```

pub mod string_utils;
pub mod json_utils;
