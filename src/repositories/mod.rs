//! 엔티티 저장소 계층
//!
//! 검증기는 구체적인 저장소를 알지 못하고 [`EntityStore`] trait 만 사용합니다.
//! 호스트 애플리케이션은 이름으로 저장소를 등록하고, OpenID 플러그인은
//! 설정의 `service` 값으로 저장소를 찾아 씁니다.
//!
//! # 제공 구현
//!
//! - [`MongoEntityStore`] - MongoDB 컬렉션 기반 (`_id` 식별자)
//! - [`MemoryEntityStore`] - 프로세스 내 저장소 (숫자 `id` 식별자, 선택적 페이지네이션)
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::{EntityStore, StoreQuery};
//!
//! let result = store.find(StoreQuery::by_field("steamId", "76561197960287930").limit(1)).await?;
//! let user = result.into_first();
//! ```

pub mod memory_store;
pub mod mongo_store;

pub use memory_store::MemoryEntityStore;
pub use mongo_store::MongoEntityStore;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use crate::core::errors::StoreResult;
use crate::domain::entities::{Entity, FindResult};

/// 엔티티 저장소 조회 조건
///
/// `filter` 의 모든 필드가 일치하는 엔티티를 찾습니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreQuery {
    pub filter: Map<String, Value>,
    pub limit: Option<usize>,
}

impl StoreQuery {
    pub fn by_field(field: &str, value: impl Into<Value>) -> Self {
        let mut filter = Map::new();
        filter.insert(field.to_string(), value.into());

        Self { filter, limit: None }
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// 엔티티가 모든 조건을 만족하는지 확인합니다.
    pub fn matches(&self, entity: &Entity) -> bool {
        self.filter
            .iter()
            .all(|(field, expected)| entity.get(field) == Some(expected))
    }
}

/// OpenID 흐름에서 발생한 쓰기임을 알리는 파라미터
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenIdParams {
    pub provider: String,
}

/// 저장소 create / update 호출 파라미터
///
/// 저장소 훅은 `openid.provider` 로 OpenID 로그인에 의한 쓰기를 구별할 수 있습니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StoreParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openid: Option<OpenIdParams>,
}

impl StoreParams {
    pub fn openid(provider: &str) -> Self {
        Self {
            openid: Some(OpenIdParams {
                provider: provider.to_string(),
            }),
        }
    }

    pub fn provider(&self) -> Option<&str> {
        self.openid.as_ref().map(|params| params.provider.as_str())
    }
}

/// 로컬 엔티티를 보관하는 저장소
///
/// 쓰기의 원자성, 유니크 제약 등은 저장소 구현이 책임집니다.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// 저장소가 부여하는 식별자 필드 이름 (예: `id`, `_id`)
    fn id_field(&self) -> &str;

    async fn find(&self, query: StoreQuery) -> StoreResult<FindResult>;

    async fn create(&self, record: Entity, params: &StoreParams) -> StoreResult<Entity>;

    /// `id` 엔티티를 `record` 로 교체합니다.
    async fn update(&self, id: &Value, record: Entity, params: &StoreParams) -> StoreResult<Entity>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_matches_all_fields() {
        let entity = json!({ "steamId": "p1", "email": "a@example.com" })
            .as_object()
            .cloned()
            .unwrap();

        assert!(StoreQuery::by_field("steamId", "p1").matches(&entity));
        assert!(!StoreQuery::by_field("steamId", "p2").matches(&entity));
        assert!(!StoreQuery::by_field("githubId", "p1").matches(&entity));
        assert!(StoreQuery::default().matches(&entity));
    }

    #[test]
    fn test_store_params_wire_shape() {
        let params = StoreParams::openid("steam");

        assert_eq!(params.provider(), Some("steam"));
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({ "openid": { "provider": "steam" } })
        );
        assert_eq!(serde_json::to_value(StoreParams::default()).unwrap(), json!({}));
    }
}
