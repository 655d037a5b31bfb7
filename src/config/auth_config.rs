//! # Authentication Configuration Module
//!
//! 호스트 애플리케이션의 전역 인증 설정(`authentication` 블록)을 관리합니다.
//! 이 설정은 OpenID 스트래티지 설정 병합의 두 번째, 세 번째 계층으로 사용됩니다.
//!
//! ## 설정 형식
//!
//! ```json
//! {
//!   "entity": "user",
//!   "service": "users",
//!   "passReqToCallback": true,
//!   "steam": {
//!     "apiKey": "<steam web api key>",
//!     "realm": "http://localhost:3030/",
//!     "scope": ["user"]
//!   }
//! }
//! ```
//!
//! - `entity`, `service`, `passReqToCallback` 는 모든 프로바이더에 공통으로 적용됩니다.
//! - 프로바이더 이름과 같은 키(`steam` 등)의 객체는 해당 프로바이더 전용 설정입니다.
//!
//! ## 환경 변수
//!
//! ```bash
//! # JSON 파일 경로 (우선)
//! export AUTH_SETTINGS_FILE="config/authentication.json"
//!
//! # 또는 인라인 JSON
//! export AUTH_SETTINGS='{"steam":{"apiKey":"1234","realm":"secret"}}'
//!
//! # 개별 재정의
//! export AUTH_ENTITY="user"
//! export AUTH_SERVICE="users"
//! ```

use std::env;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::core::errors::ConfigError;
use crate::utils::string_utils::clean_optional_string;

/// 전역 인증 설정에서 OpenID 설정으로 그대로 복사되는 키 목록
pub const INCLUDE_KEYS: [&str; 3] = ["entity", "service", "passReqToCallback"];

/// 호스트 애플리케이션의 전역 인증 설정
///
/// 공통 키는 타입이 지정된 필드로, 그 외의 키(프로바이더 블록, secret 등)는
/// `extra` 맵으로 보존됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSettings {
    /// 인증된 엔티티의 논리 이름 (예: "user")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,

    /// 엔티티 저장소 서비스 이름 (예: "users")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,

    /// 검증기에 요청 컨텍스트를 전달할지 여부
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_req_to_callback: Option<bool>,

    /// 프로바이더별 설정 블록 및 기타 키
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for AuthSettings {
    /// 인증 계층의 기본값: `user` 엔티티, `users` 서비스, 요청 컨텍스트 전달
    fn default() -> Self {
        Self {
            entity: Some("user".to_string()),
            service: Some("users".to_string()),
            pass_req_to_callback: Some(true),
            extra: Map::new(),
        }
    }
}

impl AuthSettings {
    /// 공통 키가 하나도 없는 빈 설정을 생성합니다.
    pub fn empty() -> Self {
        Self {
            entity: None,
            service: None,
            pass_req_to_callback: None,
            extra: Map::new(),
        }
    }

    /// JSON 값으로부터 설정을 생성합니다.
    ///
    /// 누락된 공통 키는 채우지 않습니다.
    pub fn from_json(value: Value) -> Result<Self, ConfigError> {
        serde_json::from_value(value)
            .map_err(|e| ConfigError::Environment(format!("invalid authentication settings: {}", e)))
    }

    /// 환경 변수로부터 설정을 로드합니다.
    ///
    /// `AUTH_SETTINGS_FILE` → `AUTH_SETTINGS` → 기본값 순으로 확인한 뒤,
    /// `AUTH_ENTITY`, `AUTH_SERVICE` 가 있으면 덮어씁니다.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = if let Some(path) = clean_optional_string(env::var("AUTH_SETTINGS_FILE").ok()) {
            let raw = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::Environment(format!("cannot read {}: {}", path, e)))?;
            Self::from_raw_json(&raw)?
        } else if let Some(raw) = clean_optional_string(env::var("AUTH_SETTINGS").ok()) {
            Self::from_raw_json(&raw)?
        } else {
            Self::default()
        };

        if let Some(entity) = clean_optional_string(env::var("AUTH_ENTITY").ok()) {
            settings.entity = Some(entity);
        }

        if let Some(service) = clean_optional_string(env::var("AUTH_SERVICE").ok()) {
            settings.service = Some(service);
        }

        log::debug!("인증 설정 로드됨: entity={:?}, service={:?}", settings.entity, settings.service);
        Ok(settings)
    }

    fn from_raw_json(raw: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| ConfigError::Environment(format!("authentication settings are not valid JSON: {}", e)))?;
        Self::from_json(value)
    }

    /// 프로바이더 전용 설정 블록을 추가합니다.
    pub fn with_provider(mut self, name: &str, block: Value) -> Self {
        self.extra.insert(name.to_string(), block);
        self
    }

    /// 프로바이더 전용 설정 블록을 반환합니다.
    ///
    /// 해당 키가 없거나 객체가 아니면 `None` 입니다.
    pub fn provider(&self, name: &str) -> Option<&Map<String, Value>> {
        self.extra.get(name).and_then(Value::as_object)
    }

    /// 공통 키 중 값이 존재하는 것만 맵으로 반환합니다.
    pub fn included(&self) -> Map<String, Value> {
        let mut included = Map::new();

        if let Some(entity) = &self.entity {
            included.insert(INCLUDE_KEYS[0].to_string(), Value::String(entity.clone()));
        }
        if let Some(service) = &self.service {
            included.insert(INCLUDE_KEYS[1].to_string(), Value::String(service.clone()));
        }
        if let Some(pass) = self.pass_req_to_callback {
            included.insert(INCLUDE_KEYS[2].to_string(), Value::Bool(pass));
        }

        included
    }
}
