//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::openid::{OpenIdAuth, ReplayStrategyFactory};
//!
//! let plugin = OpenIdAuth::configure(&app, options)?;
//! let verifier = plugin.activate(&app)?;
//! ```

pub mod openid;
