//! # Registry - 저장소와 스트래티지 레지스트리
//!
//! 호스트 애플리케이션이 소유하는 두 개의 이름 기반 레지스트리입니다.
//!
//! | 레지스트리 | 키 | 값 | 용도 |
//! |------------|----|----|------|
//! | [`ServiceRegistry`] | 서비스 경로 (`"users"`) | `Arc<dyn EntityStore>` | 설정의 `service` 이름으로 저장소 조회 |
//! | [`StrategyRegistry`] | 프로바이더 이름 (`"steam"`) | `Arc<dyn Strategy>` + 유효 설정 | 인증 요청 시 스트래티지 실행 |
//!
//! 두 레지스트리 모두 `RwLock<HashMap>` 으로 보호되며, 같은 이름으로 다시 등록하면
//! 이전 값을 교체합니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! let services = ServiceRegistry::new();
//! services.set("users", Arc::new(MemoryEntityStore::new()));
//!
//! let users = services.get("users").expect("users store");
//! ```

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use log::{debug, info};
use crate::config::OpenIdSettings;
use crate::repositories::EntityStore;
use crate::services::openid::Strategy;
use crate::utils::string_utils::strip_slashes;

/// 이름으로 엔티티 저장소를 찾는 레지스트리
///
/// 서비스 경로의 앞뒤 슬래시는 무시합니다 (`"/users"` 와 `"users"` 는 같은 저장소).
#[derive(Default)]
pub struct ServiceRegistry {
    stores: RwLock<HashMap<String, Arc<dyn EntityStore>>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, path: &str, store: Arc<dyn EntityStore>) {
        let path = strip_slashes(path).to_string();
        info!("📦 Registering service: {}", path);

        let mut stores = self.stores.write().unwrap_or_else(PoisonError::into_inner);
        stores.insert(path, store);
    }

    pub fn get(&self, path: &str) -> Option<Arc<dyn EntityStore>> {
        let stores = self.stores.read().unwrap_or_else(PoisonError::into_inner);
        stores.get(strip_slashes(path)).cloned()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// 등록된 서비스 경로 목록 (정렬됨)
    pub fn names(&self) -> Vec<String> {
        let stores = self.stores.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = stores.keys().cloned().collect();
        names.sort();
        names
    }
}

/// 프로바이더 이름으로 스트래티지와 그 설정을 보관하는 레지스트리
#[derive(Default)]
pub struct StrategyRegistry {
    strategies: RwLock<HashMap<String, Arc<dyn Strategy>>>,
    options: RwLock<HashMap<String, OpenIdSettings>>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 스트래티지 인스턴스를 등록합니다.
    pub fn use_strategy(&self, name: &str, strategy: Arc<dyn Strategy>) {
        info!("🔑 Registering strategy: {}", name);

        let mut strategies = self.strategies.write().unwrap_or_else(PoisonError::into_inner);
        strategies.insert(name.to_string(), strategy);
    }

    /// 스트래티지의 유효 설정을 기록합니다.
    pub fn set_options(&self, name: &str, settings: OpenIdSettings) {
        debug!("Strategy options recorded: {} ({})", name, settings.return_url);

        let mut options = self.options.write().unwrap_or_else(PoisonError::into_inner);
        options.insert(name.to_string(), settings);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Strategy>> {
        let strategies = self.strategies.read().unwrap_or_else(PoisonError::into_inner);
        strategies.get(name).cloned()
    }

    pub fn options(&self, name: &str) -> Option<OpenIdSettings> {
        let options = self.options.read().unwrap_or_else(PoisonError::into_inner);
        options.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        let strategies = self.strategies.read().unwrap_or_else(PoisonError::into_inner);
        strategies.contains_key(name)
    }

    pub fn len(&self) -> usize {
        let strategies = self.strategies.read().unwrap_or_else(PoisonError::into_inner);
        strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
