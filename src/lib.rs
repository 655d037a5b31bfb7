//! OpenID 인증 백엔드
//!
//! 외부 OpenID 스트래티지(예: Steam)를 호스트 애플리케이션에 연결하고,
//! 핸드셰이크로 얻은 외부 신원을 로컬 엔티티로 확정합니다.
//!
//! # Features
//!
//! - **설정 해석**: 내장 기본값, 전역 인증 설정, 프로바이더 블록, 호출 옵션의 4계층 병합
//! - **신원 검증**: 기존 엔티티 찾기 / 새 엔티티 만들기 / 로그인 세션에 계정 연동
//! - **저장소 추상화**: MongoDB 컬렉션 또는 메모리 저장소
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │     AuthApp     │ ← 인증 설정, 저장소/스트래티지 레지스트리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  OpenID Plugin  │ ← 설정 해석 → 검증기/스트래티지 등록
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Verifier     │ ← 찾기 / 만들기 / 연동
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Entity Store   │ ← MongoDB / 메모리
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use openid_auth_backend::config::{AuthSettings, HostInfo, OpenIdOptions};
//! use openid_auth_backend::core::application::AuthApp;
//! use openid_auth_backend::services::openid::setup;
//!
//! let mut app = AuthApp::new(HostInfo::from_env());
//! app.configure_authentication(AuthSettings::from_env()?);
//! app.use_service("users", users_store);
//!
//! setup(&app, OpenIdOptions::new("steam").strategy(steam).set("apiKey", key).set("realm", realm))?;
//! let outcome = app.authenticate("steam", &request).await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
