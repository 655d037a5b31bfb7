//! # 호스트 애플리케이션
//!
//! OpenID 플러그인이 붙는 호스트 애플리케이션의 최소 모델입니다.
//!
//! - 전역 인증 설정 (인증 계층이 초기화되었는지 여부 포함)
//! - 호스트 정보 (절대 URL 생성용)
//! - 이름 기반 엔티티 저장소 레지스트리
//! - 스트래티지 레지스트리
//!
//! ## 초기화 순서
//!
//! ```rust,ignore
//! let mut app = AuthApp::new(HostInfo::from_env());
//! app.configure_authentication(AuthSettings::from_env()?);
//! app.use_service("users", users_store);
//!
//! let plugin = OpenIdAuth::configure(&app, options)?;
//! plugin.activate(&app)?;
//!
//! let outcome = app.authenticate("steam", &RequestContext::new()).await?;
//! ```

use std::sync::Arc;
use log::warn;
use crate::config::{AuthSettings, HostInfo};
use crate::core::errors::AppError;
use crate::core::registry::{ServiceRegistry, StrategyRegistry};
use crate::domain::{RequestContext, VerifyResult};
use crate::repositories::EntityStore;

pub struct AuthApp {
    host: HostInfo,
    /// `None` 이면 인증 계층이 초기화되지 않은 상태
    auth: Option<AuthSettings>,
    services: ServiceRegistry,
    strategies: StrategyRegistry,
}

impl AuthApp {
    pub fn new(host: HostInfo) -> Self {
        Self {
            host,
            auth: None,
            services: ServiceRegistry::new(),
            strategies: StrategyRegistry::new(),
        }
    }

    /// 인증 계층을 초기화합니다. OpenID 플러그인 설정 전에 호출해야 합니다.
    pub fn configure_authentication(&mut self, settings: AuthSettings) -> &mut Self {
        self.auth = Some(settings);
        self
    }

    pub fn auth_settings(&self) -> Option<&AuthSettings> {
        self.auth.as_ref()
    }

    pub fn host(&self) -> &HostInfo {
        &self.host
    }

    /// 엔티티 저장소를 서비스 경로에 등록합니다.
    pub fn use_service(&self, path: &str, store: Arc<dyn EntityStore>) -> &Self {
        self.services.set(path, store);
        self
    }

    pub fn service(&self, path: &str) -> Option<Arc<dyn EntityStore>> {
        self.services.get(path)
    }

    pub fn services(&self) -> &ServiceRegistry {
        &self.services
    }

    pub fn strategies(&self) -> &StrategyRegistry {
        &self.strategies
    }

    /// 등록된 스트래티지로 요청을 인증합니다.
    pub async fn authenticate(&self, name: &str, req: &RequestContext) -> VerifyResult {
        let strategy = self.strategies.get(name).ok_or_else(|| {
            warn!("⚠️ Unknown authentication strategy requested: {}", name);
            AppError::AuthenticationError(format!("unknown authentication strategy '{}'", name))
        })?;

        strategy.authenticate(req).await
    }
}

impl Default for AuthApp {
    fn default() -> Self {
        Self::new(HostInfo::default())
    }
}
