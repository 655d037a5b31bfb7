//! # OpenID 플러그인
//!
//! 두 단계로 외부 OpenID 스트래티지를 호스트 애플리케이션에 붙입니다.
//!
//! 1. **configure** - 인증 계층 초기화 여부를 확인하고 유효 설정을 해석합니다.
//!    설정 에러는 여기서 동기적으로 발생하며, 아무것도 등록되지 않습니다.
//! 2. **activate** - 엔티티 저장소를 찾고, 검증기와 스트래티지를 만들어
//!    프로바이더 이름으로 정확히 하나의 스트래티지와 그 설정을 등록합니다.
//!
//! ```rust,ignore
//! let options = OpenIdOptions::new("steam")
//!     .strategy(ReplayStrategyFactory::from_file("profile.json")?)
//!     .set("apiKey", api_key)
//!     .set("realm", realm);
//!
//! let verifier = OpenIdAuth::configure(&app, options)?.activate(&app)?;
//! ```

use std::sync::Arc;
use log::{debug, info};
use crate::config::{resolve, OpenIdOptions, OpenIdSettings, ServiceRef};
use crate::core::application::AuthApp;
use crate::core::errors::ConfigError;
use crate::repositories::EntityStore;
use crate::services::openid::{DefaultVerifierFactory, Verifier, VerifierFactory};
use crate::utils::string_utils::is_valid_string;

/// 설정 해석이 끝난 OpenID 플러그인
#[derive(Debug)]
pub struct OpenIdAuth {
    settings: OpenIdSettings,
    options: OpenIdOptions,
}

impl OpenIdAuth {
    /// 유효 설정을 해석합니다.
    pub fn configure(app: &AuthApp, options: OpenIdOptions) -> Result<Self, ConfigError> {
        let auth = app
            .auth_settings()
            .ok_or(ConfigError::AuthenticationNotInitialized)?;

        let settings = resolve(auth, &options, app.host())?;
        debug!("[{}] effective settings resolved: {:?}", settings.name, settings);

        Ok(Self { settings, options })
    }

    pub fn settings(&self) -> &OpenIdSettings {
        &self.settings
    }

    /// 옵션의 저장소 핸들, 또는 설정의 서비스 이름으로 저장소를 찾습니다.
    fn resolve_store(&self, app: &AuthApp) -> Result<Arc<dyn EntityStore>, ConfigError> {
        if let Some(ServiceRef::Handle(store)) = &self.options.service {
            return Ok(store.clone());
        }

        let name = self
            .settings
            .service
            .as_deref()
            .filter(|name| is_valid_string(name))
            .ok_or(ConfigError::MissingService)?;

        app.service(name)
            .ok_or_else(|| ConfigError::ServiceNotFound(name.to_string()))
    }

    /// 검증기와 스트래티지를 만들어 등록합니다.
    ///
    /// 등록된 검증기를 돌려주므로 호스트가 직접 호출할 수도 있습니다.
    pub fn activate(&self, app: &AuthApp) -> Result<Arc<dyn Verifier>, ConfigError> {
        let strategy_factory = self
            .options
            .strategy
            .as_ref()
            .ok_or(ConfigError::MissingStrategy)?;
        let store = self.resolve_store(app)?;

        let verifier = match &self.options.verifier {
            Some(factory) => factory.create(store, &self.settings),
            None => DefaultVerifierFactory.create(store, &self.settings),
        };

        let strategy = strategy_factory.create(&self.settings, verifier.clone());

        let name = &self.settings.name;
        app.strategies().use_strategy(name, Arc::from(strategy));
        app.strategies().set_options(name, self.settings.clone());

        info!("✅ OpenID strategy activated: {} ({})", name, self.settings.path);
        Ok(verifier)
    }
}

/// [`OpenIdAuth::configure`] 와 [`OpenIdAuth::activate`] 를 차례로 실행합니다.
pub fn setup(app: &AuthApp, options: OpenIdOptions) -> Result<Arc<dyn Verifier>, ConfigError> {
    OpenIdAuth::configure(app, options)?.activate(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use crate::config::{AuthSettings, Environment, HostInfo};
    use crate::domain::{IdentityProfile, RequestContext, Verified, VerifyResult};
    use crate::repositories::MemoryEntityStore;
    use crate::services::openid::ReplayStrategyFactory;

    const IDENTIFIER: &str = "https://steamcommunity.com/openid/id/p1";

    fn app_with_users() -> (AuthApp, Arc<MemoryEntityStore>) {
        let mut app = AuthApp::new(HostInfo::new("localhost", 3030, Environment::Development));
        app.configure_authentication(AuthSettings::default().with_provider(
            "steam",
            json!({ "apiKey": "1234", "realm": "http://localhost:3030/" }),
        ));

        let users = Arc::new(MemoryEntityStore::new());
        app.use_service("users", users.clone());

        (app, users)
    }

    fn replay() -> ReplayStrategyFactory {
        ReplayStrategyFactory::new(IDENTIFIER, IdentityProfile::new("p1"))
    }

    struct FixedVerifier;

    #[async_trait]
    impl Verifier for FixedVerifier {
        async fn verify(
            &self,
            _req: Option<&RequestContext>,
            _identifier: &str,
            _profile: IdentityProfile,
        ) -> VerifyResult {
            let entity = json!({ "id": "fixed" }).as_object().cloned().unwrap_or_default();
            Ok(Some(Verified { entity, payload: None }))
        }
    }

    fn fixed_verifier(_store: Arc<dyn EntityStore>, _settings: &OpenIdSettings) -> Arc<dyn Verifier> {
        Arc::new(FixedVerifier)
    }

    #[actix_web::test]
    async fn test_activation_registers_strategy_and_options() {
        let (app, users) = app_with_users();

        setup(&app, OpenIdOptions::new("steam").strategy(replay())).unwrap();

        assert_eq!(app.strategies().len(), 1);
        let options = app.strategies().options("steam").unwrap();
        assert_eq!(options.id_field, "steamId");
        assert_eq!(options.return_url, "http://localhost:3030/auth/steam/return");
        assert_eq!(options.service.as_deref(), Some("users"));

        let verified = app
            .authenticate("steam", &RequestContext::new())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(verified.entity["steamId"], json!("p1"));
        assert_eq!(verified.payload.unwrap()["userId"], json!(0));
        assert_eq!(users.len(), 1);
    }

    #[test]
    fn test_uninitialized_authentication_is_rejected() {
        let app = AuthApp::default();

        let result = OpenIdAuth::configure(&app, OpenIdOptions::new("steam").strategy(replay()));

        assert!(matches!(result, Err(ConfigError::AuthenticationNotInitialized)));
    }

    #[test]
    fn test_configuration_errors_register_nothing() {
        let (app, _users) = app_with_users();
        let options = OpenIdOptions::new("github")
            .strategy(replay())
            .set("realm", "http://localhost:3030/");

        assert_eq!(setup(&app, options).err(), Some(ConfigError::MissingApiKey));
        assert!(app.strategies().is_empty());
    }

    #[test]
    fn test_unknown_service_name() {
        let (app, _users) = app_with_users();
        let options = OpenIdOptions::new("steam").strategy(replay()).service("people");

        assert_eq!(
            setup(&app, options).err(),
            Some(ConfigError::ServiceNotFound("people".to_string()))
        );
        assert!(app.strategies().is_empty());
    }

    #[test]
    fn test_missing_service_reference() {
        let mut app = AuthApp::new(HostInfo::default());
        app.configure_authentication(AuthSettings::empty());
        let options = OpenIdOptions::new("steam")
            .strategy(replay())
            .set("apiKey", "1234")
            .set("realm", "secret");

        assert_eq!(setup(&app, options).err(), Some(ConfigError::MissingService));
    }

    #[actix_web::test]
    async fn test_store_handle_from_options() {
        let mut app = AuthApp::new(HostInfo::default());
        app.configure_authentication(AuthSettings::empty());
        let people = Arc::new(MemoryEntityStore::new());
        let handle: Arc<dyn EntityStore> = people.clone();
        let options = OpenIdOptions::new("steam")
            .strategy(replay())
            .service(handle)
            .set("apiKey", "1234")
            .set("realm", "secret");

        setup(&app, options).unwrap();
        app.authenticate("steam", &RequestContext::new()).await.unwrap();

        assert_eq!(people.len(), 1);
    }

    #[actix_web::test]
    async fn test_custom_verifier_replaces_default() {
        let (app, users) = app_with_users();
        let options = OpenIdOptions::new("steam")
            .strategy(replay())
            .verifier(fixed_verifier);

        setup(&app, options).unwrap();
        let verified = app
            .authenticate("steam", &RequestContext::new())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(verified.entity["id"], json!("fixed"));
        assert!(users.is_empty());
    }

    #[actix_web::test]
    async fn test_request_context_reaches_verifier_when_enabled() {
        let (app, users) = app_with_users();
        let existing = users
            .create(
                json!({ "email": "admin@example.com" }).as_object().cloned().unwrap(),
                &crate::repositories::StoreParams::default(),
            )
            .await
            .unwrap();
        setup(&app, OpenIdOptions::new("steam").strategy(replay())).unwrap();
        let req = RequestContext::new().with_attribute("user", Value::Object(existing));

        let verified = app.authenticate("steam", &req).await.unwrap().unwrap();

        assert_eq!(verified.payload, None);
        assert_eq!(verified.entity["email"], json!("admin@example.com"));
        assert_eq!(users.len(), 1);
    }

    #[actix_web::test]
    async fn test_request_context_withheld_when_disabled() {
        let (app, users) = app_with_users();
        let existing = users
            .create(
                json!({ "email": "admin@example.com" }).as_object().cloned().unwrap(),
                &crate::repositories::StoreParams::default(),
            )
            .await
            .unwrap();
        let options = OpenIdOptions::new("steam")
            .strategy(replay())
            .set("passReqToCallback", false);
        setup(&app, options).unwrap();
        let req = RequestContext::new().with_attribute("user", Value::Object(existing));

        let verified = app.authenticate("steam", &req).await.unwrap().unwrap();

        assert!(verified.payload.is_some());
        assert_eq!(users.len(), 2);
    }
}
