//! # OpenID Strategy Configuration
//!
//! 네 개의 설정 계층을 하나의 유효 설정([`OpenIdSettings`])으로 병합합니다.
//!
//! ## 병합 순서 (뒤의 계층이 앞의 계층을 덮어씀)
//!
//! ```text
//! 1. 내장 기본값        idField = "{name}Id", path = "/auth/{name}", session = true
//! 2. 전역 인증 설정      entity / service / passReqToCallback (존재하는 키만)
//! 3. 프로바이더 블록     authentication[name]
//! 4. 호출 옵션          OpenIdOptions.settings + name (+ 이름으로 지정된 service)
//! ```
//!
//! 병합 후 `returnPath` 가 없으면 `{path}/return`, `returnURL` 이 없으면
//! 호스트 정보로 만든 절대 URL을 채웁니다.
//!
//! 스트래티지 구현, 검증기 구현 같은 메타 필드는 [`OpenIdOptions`] 의 별도 필드로
//! 전달되며 외부 스트래티지가 받는 설정에는 절대 병합되지 않습니다.
//!
//! ## 검증 (모두 활성화 전에 동기적으로 실패)
//!
//! | 조건 | 에러 |
//! |------|------|
//! | name 없음 | [`ConfigError::MissingStrategyName`] |
//! | Strategy 없음 | [`ConfigError::MissingStrategy`] |
//! | apiKey 없음 | [`ConfigError::MissingApiKey`] |
//! | realm 없음 | [`ConfigError::MissingRealm`] |
//! | apiKey / realm 이 문자열이 아님 | [`ConfigError::InvalidSettings`] |
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! let options = OpenIdOptions::new("steam")
//!     .strategy(steam_strategy_factory)
//!     .set("apiKey", "1234")
//!     .set("realm", "http://localhost:3030/");
//!
//! let settings = resolve(&AuthSettings::default(), &options, &HostInfo::from_env())?;
//! assert_eq!(settings.id_field, "steamId");
//! assert_eq!(settings.return_path, "/auth/steam/return");
//! ```

use std::fmt;
use std::sync::Arc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::config::{AuthSettings, HostInfo};
use crate::core::errors::ConfigError;
use crate::repositories::EntityStore;
use crate::services::openid::{StrategyFactory, VerifierFactory};
use crate::utils::json_utils::{is_truthy, merge_maps};
use crate::utils::string_utils::is_valid_string;

/// 엔티티 저장소 참조
///
/// 호스트에 등록된 서비스 이름 또는 저장소 핸들 자체를 가리킵니다.
#[derive(Clone)]
pub enum ServiceRef {
    Name(String),
    Handle(Arc<dyn EntityStore>),
}

impl fmt::Debug for ServiceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceRef::Name(name) => f.debug_tuple("Name").field(name).finish(),
            ServiceRef::Handle(_) => f.write_str("Handle(..)"),
        }
    }
}

impl From<&str> for ServiceRef {
    fn from(name: &str) -> Self {
        ServiceRef::Name(name.to_string())
    }
}

impl From<Arc<dyn EntityStore>> for ServiceRef {
    fn from(store: Arc<dyn EntityStore>) -> Self {
        ServiceRef::Handle(store)
    }
}

/// OpenID 플러그인 호출 옵션 (네 번째 설정 계층)
///
/// `strategy`, `verifier`, 핸들 형태의 `service` 는 메타 필드로,
/// 설정 병합에 참여하지 않고 활성화 단계에서 따로 소비됩니다.
#[derive(Clone, Default)]
pub struct OpenIdOptions {
    /// 프로바이더 이름 (예: "steam")
    pub name: Option<String>,
    /// 외부 OpenID 스트래티지 구현
    pub strategy: Option<Arc<dyn StrategyFactory>>,
    /// 커스텀 검증기 구현 (없으면 기본 검증기 사용)
    pub verifier: Option<Arc<dyn VerifierFactory>>,
    /// 엔티티 저장소 참조
    pub service: Option<ServiceRef>,
    /// 그 외 모든 옵션 (apiKey, realm, path, entity, 커스텀 키 등)
    pub settings: Map<String, Value>,
}

impl fmt::Debug for OpenIdOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenIdOptions")
            .field("name", &self.name)
            .field("strategy", &self.strategy.is_some())
            .field("verifier", &self.verifier.is_some())
            .field("service", &self.service)
            .field("settings", &self.settings)
            .finish()
    }
}

impl OpenIdOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn strategy<S: StrategyFactory + 'static>(mut self, strategy: S) -> Self {
        self.strategy = Some(Arc::new(strategy));
        self
    }

    pub fn verifier<V: VerifierFactory + 'static>(mut self, verifier: V) -> Self {
        self.verifier = Some(Arc::new(verifier));
        self
    }

    pub fn service(mut self, service: impl Into<ServiceRef>) -> Self {
        self.service = Some(service.into());
        self
    }

    /// 임의의 옵션 값을 설정합니다.
    pub fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.settings.insert(key.to_string(), value.into());
        self
    }

    /// 옵션 값을 제거합니다.
    pub fn unset(mut self, key: &str) -> Self {
        self.settings.remove(key);
        self
    }

    /// 네 번째 계층으로 병합될 맵을 만듭니다.
    fn layer(&self, name: &str) -> Map<String, Value> {
        let mut layer = self.settings.clone();

        if let Some(ServiceRef::Name(service)) = &self.service {
            layer.insert("service".to_string(), Value::String(service.clone()));
        }
        layer.insert("name".to_string(), Value::String(name.to_string()));

        layer
    }
}

/// 병합과 검증이 끝난 유효 설정
///
/// 해석 이후에는 변경되지 않으며, 외부 스트래티지와 검증기에 그대로 전달됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenIdSettings {
    /// 프로바이더 이름
    pub name: String,
    /// 로컬 엔티티에서 프로바이더 사용자 ID를 담는 필드명
    pub id_field: String,
    pub path: String,
    pub return_path: String,
    #[serde(rename = "returnURL")]
    pub return_url: String,
    /// 요청 컨텍스트 조회와 인증 페이로드 키에 쓰이는 엔티티 이름
    #[serde(default = "default_entity")]
    pub entity: String,
    /// 호스트에 등록된 엔티티 저장소 이름
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    pub session: bool,
    #[serde(default)]
    pub pass_req_to_callback: bool,
    /// 프로바이더 전용 키 (apiKey, realm, scope, 커스텀 필드)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_entity() -> String {
    "user".to_string()
}

impl OpenIdSettings {
    pub fn api_key(&self) -> Option<&str> {
        self.extra.get("apiKey").and_then(Value::as_str)
    }

    pub fn realm(&self) -> Option<&str> {
        self.extra.get("realm").and_then(Value::as_str)
    }

    /// 인증 페이로드의 키 (`{entity}Id`)
    pub fn payload_key(&self) -> String {
        format!("{}Id", self.entity)
    }
}

/// 네 개의 계층을 병합하여 유효 설정을 만듭니다.
///
/// 순수 함수이며 같은 입력에 대해 항상 같은 결과를 돌려줍니다.
/// 실패 시 어떤 부수 효과도 일어나지 않습니다.
pub fn resolve(
    auth: &AuthSettings,
    options: &OpenIdOptions,
    host: &HostInfo,
) -> Result<OpenIdSettings, ConfigError> {
    let name = options
        .name
        .as_deref()
        .filter(|name| is_valid_string(name))
        .ok_or(ConfigError::MissingStrategyName)?;

    if options.strategy.is_none() {
        return Err(ConfigError::MissingStrategy);
    }

    let mut merged = builtin_defaults(name);
    merge_maps(&mut merged, &auth.included());
    if let Some(provider) = auth.provider(name) {
        merge_maps(&mut merged, provider);
    }
    merge_maps(&mut merged, &options.layer(name));

    derive_return_locations(&mut merged, host)?;

    require_text(&merged, "apiKey", ConfigError::MissingApiKey)?;
    require_text(&merged, "realm", ConfigError::MissingRealm)?;

    serde_json::from_value(Value::Object(merged))
        .map_err(|e| ConfigError::InvalidSettings(e.to_string()))
}

/// 값이 비어 있으면 `missing`, 문자열이 아니면 `InvalidSettings` 입니다.
fn require_text(merged: &Map<String, Value>, key: &str, missing: ConfigError) -> Result<(), ConfigError> {
    match merged.get(key) {
        Some(value) if !is_truthy(value) => Err(missing),
        None => Err(missing),
        Some(Value::String(_)) => Ok(()),
        Some(_) => Err(ConfigError::InvalidSettings(format!("'{}' must be a string", key))),
    }
}

fn builtin_defaults(name: &str) -> Map<String, Value> {
    let mut defaults = Map::new();
    defaults.insert("idField".to_string(), Value::String(format!("{}Id", name)));
    defaults.insert("path".to_string(), Value::String(format!("/auth/{}", name)));
    defaults.insert("session".to_string(), Value::Bool(true));
    defaults
}

/// `returnPath`, `returnURL` 이 비어 있으면 `path` 와 호스트 정보로 채웁니다.
fn derive_return_locations(merged: &mut Map<String, Value>, host: &HostInfo) -> Result<(), ConfigError> {
    if !merged.get("returnPath").is_some_and(is_truthy) {
        let path = merged
            .get("path")
            .and_then(Value::as_str)
            .ok_or_else(|| ConfigError::InvalidSettings("'path' must be a string".to_string()))?;
        let return_path = format!("{}/return", path);
        merged.insert("returnPath".to_string(), Value::String(return_path));
    }

    if !merged.get("returnURL").is_some_and(is_truthy) {
        let return_path = merged
            .get("returnPath")
            .and_then(Value::as_str)
            .ok_or_else(|| ConfigError::InvalidSettings("'returnPath' must be a string".to_string()))?;
        let return_url = host.make_url(return_path);
        merged.insert("returnURL".to_string(), Value::String(return_url));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;
    use crate::services::openid::{Strategy, Verifier};
    use serde_json::json;

    struct NoopStrategy;

    #[async_trait::async_trait]
    impl Strategy for NoopStrategy {
        async fn authenticate(
            &self,
            _req: &crate::domain::RequestContext,
        ) -> crate::domain::VerifyResult {
            Ok(None)
        }
    }

    fn noop_factory(_settings: &OpenIdSettings, _verifier: Arc<dyn Verifier>) -> Box<dyn Strategy> {
        Box::new(NoopStrategy)
    }

    fn host() -> HostInfo {
        HostInfo::new("localhost", 3030, Environment::Development)
    }

    fn global() -> AuthSettings {
        AuthSettings::default().with_provider(
            "steam",
            json!({ "apiKey": "1234", "realm": "secret", "scope": ["user"] }),
        )
    }

    fn options() -> OpenIdOptions {
        OpenIdOptions::new("steam")
            .strategy(noop_factory)
            .set("apiKey", "1234")
            .set("realm", "secret")
    }

    #[test]
    fn test_derived_defaults() {
        let settings = resolve(&global(), &options(), &host()).unwrap();

        assert_eq!(settings.name, "steam");
        assert_eq!(settings.id_field, "steamId");
        assert_eq!(settings.path, "/auth/steam");
        assert_eq!(settings.return_path, "/auth/steam/return");
        assert_eq!(settings.return_url, "http://localhost:3030/auth/steam/return");
        assert!(settings.session);
    }

    #[test]
    fn test_global_keys_are_copied() {
        let settings = resolve(&global(), &options(), &host()).unwrap();

        assert_eq!(settings.entity, "user");
        assert_eq!(settings.service.as_deref(), Some("users"));
        assert!(settings.pass_req_to_callback);
    }

    #[test]
    fn test_provider_block_is_mixed_in() {
        let options = options().unset("apiKey").unset("realm");
        let settings = resolve(&global(), &options, &host()).unwrap();

        assert_eq!(settings.api_key(), Some("1234"));
        assert_eq!(settings.realm(), Some("secret"));
        assert_eq!(settings.extra["scope"], json!(["user"]));
    }

    #[test]
    fn test_call_options_override_everything() {
        let options = options()
            .set("entity", "organization")
            .set("custom", true)
            .set("path", "/v1/auth/steam")
            .set("session", false);
        let settings = resolve(&global(), &options, &host()).unwrap();

        assert_eq!(settings.entity, "organization");
        assert_eq!(settings.extra["custom"], json!(true));
        assert_eq!(settings.return_path, "/v1/auth/steam/return");
        assert!(!settings.session);
    }

    #[test]
    fn test_explicit_return_path_and_url_are_kept() {
        let options = options()
            .set("returnPath", "/custom/return")
            .set("returnURL", "https://auth.example.com/custom/return");
        let settings = resolve(&global(), &options, &host()).unwrap();

        assert_eq!(settings.return_path, "/custom/return");
        assert_eq!(settings.return_url, "https://auth.example.com/custom/return");
    }

    #[test]
    fn test_explicit_return_path_drives_return_url() {
        let options = options().set("returnPath", "/v1/api/auth/steam/return");
        let settings = resolve(&global(), &options, &host()).unwrap();

        assert_eq!(settings.return_url, "http://localhost:3030/v1/api/auth/steam/return");
    }

    #[test]
    fn test_nested_provider_maps_are_deep_merged() {
        let auth = AuthSettings::default().with_provider(
            "steam",
            json!({ "apiKey": "1234", "realm": "secret", "profileFields": { "avatar": true } }),
        );
        let options = options().set("profileFields", json!({ "country": true }));
        let settings = resolve(&auth, &options, &host()).unwrap();

        assert_eq!(settings.extra["profileFields"], json!({ "avatar": true, "country": true }));
    }

    #[test]
    fn test_service_name_from_call_options() {
        let settings = resolve(&global(), &options().service("people"), &host()).unwrap();

        assert_eq!(settings.service.as_deref(), Some("people"));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let first = serde_json::to_string(&resolve(&global(), &options(), &host()).unwrap()).unwrap();
        let second = serde_json::to_string(&resolve(&global(), &options(), &host()).unwrap()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_settings_serialize_with_wire_names() {
        let value = serde_json::to_value(resolve(&global(), &options(), &host()).unwrap()).unwrap();

        assert_eq!(value["idField"], json!("steamId"));
        assert_eq!(value["returnURL"], json!("http://localhost:3030/auth/steam/return"));
        assert_eq!(value["passReqToCallback"], json!(true));
        assert_eq!(value["apiKey"], json!("1234"));
    }

    #[test]
    fn test_missing_name() {
        let mut options = options();
        options.name = None;

        assert_eq!(resolve(&global(), &options, &host()), Err(ConfigError::MissingStrategyName));

        options.name = Some("  ".to_string());
        assert_eq!(resolve(&global(), &options, &host()), Err(ConfigError::MissingStrategyName));
    }

    #[test]
    fn test_missing_strategy() {
        let mut options = options();
        options.strategy = None;

        assert_eq!(resolve(&global(), &options, &host()), Err(ConfigError::MissingStrategy));
    }

    #[test]
    fn test_missing_api_key() {
        let options = options().unset("apiKey");

        assert_eq!(
            resolve(&AuthSettings::default(), &options, &host()),
            Err(ConfigError::MissingApiKey)
        );
    }

    #[test]
    fn test_missing_realm() {
        let options = options().unset("realm");

        assert_eq!(
            resolve(&AuthSettings::default(), &options, &host()),
            Err(ConfigError::MissingRealm)
        );
    }

    #[test]
    fn test_empty_api_key_counts_as_missing() {
        let options = options().set("apiKey", "");

        assert_eq!(resolve(&global(), &options, &host()), Err(ConfigError::MissingApiKey));
    }

    #[test]
    fn test_mistyped_setting_is_invalid() {
        let options = options().set("session", "yes");

        assert!(matches!(
            resolve(&global(), &options, &host()),
            Err(ConfigError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_non_text_credentials_are_invalid() {
        let numeric_key = options().set("apiKey", 1234);
        let nested_realm = options().set("realm", json!({ "url": "http://localhost:3030/" }));

        assert_eq!(
            resolve(&global(), &numeric_key, &host()),
            Err(ConfigError::InvalidSettings("'apiKey' must be a string".to_string()))
        );
        assert_eq!(
            resolve(&global(), &nested_realm, &host()),
            Err(ConfigError::InvalidSettings("'realm' must be a string".to_string()))
        );
    }

    #[test]
    fn test_resolved_credentials_are_readable() {
        let settings = resolve(&global(), &options(), &host()).unwrap();

        assert!(settings.api_key().is_some());
        assert!(settings.realm().is_some());
    }
}
