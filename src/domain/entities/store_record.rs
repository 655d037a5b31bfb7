//! 저장소 레코드와 조회 결과 타입

use std::fmt;
use serde_json::{Map, Value};

/// 로컬 엔티티 (저장소가 소유하는 JSON 객체)
pub type Entity = Map<String, Value>;

/// 자체 직렬화 기능을 가진 저장소 모델
///
/// ODM/ORM 모델처럼 평범한 객체로 변환하는 기능을 노출하는 레코드입니다.
/// 두 변환이 모두 있으면 `to_object` 가 우선합니다.
pub trait ModelRecord: Send + Sync + fmt::Debug {
    /// 1순위 변환 (모델 → 평범한 객체)
    fn to_object(&self) -> Option<Entity> {
        None
    }

    /// 2순위 변환 (모델 → JSON 객체)
    fn to_json(&self) -> Option<Entity> {
        None
    }

    /// 변환 기능이 없을 때 사용하는 원본 필드
    fn fields(&self) -> Entity;
}

/// 저장소가 돌려주는 단일 레코드
#[derive(Debug)]
pub enum StoreRecord {
    Plain(Entity),
    Model(Box<dyn ModelRecord>),
}

impl StoreRecord {
    /// 레코드를 평범한 엔티티로 변환합니다.
    pub fn into_entity(self) -> Entity {
        match self {
            StoreRecord::Plain(entity) => entity,
            StoreRecord::Model(model) => model
                .to_object()
                .or_else(|| model.to_json())
                .unwrap_or_else(|| model.fields()),
        }
    }
}

impl From<Entity> for StoreRecord {
    fn from(entity: Entity) -> Self {
        StoreRecord::Plain(entity)
    }
}

/// 페이지네이션이 적용된 조회 결과 봉투
#[derive(Debug)]
pub struct Page {
    pub total: usize,
    pub limit: usize,
    pub skip: usize,
    pub data: Vec<StoreRecord>,
}

/// 저장소 `find` 결과
#[derive(Debug)]
pub enum FindResult {
    Collection(Vec<StoreRecord>),
    Paginated(Page),
}

impl FindResult {
    /// 첫 번째 엔티티를 꺼내 평범한 객체로 정규화합니다.
    ///
    /// 페이지 봉투를 먼저 벗긴 뒤, 모델 변환을 적용합니다.
    pub fn into_first(self) -> Option<Entity> {
        let records = match self {
            FindResult::Paginated(page) => page.data,
            FindResult::Collection(records) => records,
        };

        records.into_iter().next().map(StoreRecord::into_entity)
    }

    pub fn len(&self) -> usize {
        match self {
            FindResult::Paginated(page) => page.data.len(),
            FindResult::Collection(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entity(value: Value) -> Entity {
        value.as_object().cloned().unwrap()
    }

    #[derive(Debug)]
    struct BothConversions;

    impl ModelRecord for BothConversions {
        fn to_object(&self) -> Option<Entity> {
            Some(entity(json!({ "via": "to_object" })))
        }

        fn to_json(&self) -> Option<Entity> {
            Some(entity(json!({ "via": "to_json" })))
        }

        fn fields(&self) -> Entity {
            entity(json!({ "via": "fields" }))
        }
    }

    #[derive(Debug)]
    struct JsonOnly;

    impl ModelRecord for JsonOnly {
        fn to_json(&self) -> Option<Entity> {
            Some(entity(json!({ "via": "to_json" })))
        }

        fn fields(&self) -> Entity {
            entity(json!({ "via": "fields" }))
        }
    }

    #[derive(Debug)]
    struct NoConversion;

    impl ModelRecord for NoConversion {
        fn fields(&self) -> Entity {
            entity(json!({ "via": "fields" }))
        }
    }

    #[test]
    fn test_collection_first_entity() {
        let result = FindResult::Collection(vec![
            StoreRecord::Plain(entity(json!({ "id": 1 }))),
            StoreRecord::Plain(entity(json!({ "id": 2 }))),
        ]);

        assert_eq!(result.into_first(), Some(entity(json!({ "id": 1 }))));
    }

    #[test]
    fn test_paginated_envelope_is_unwrapped() {
        let result = FindResult::Paginated(Page {
            total: 1,
            limit: 1,
            skip: 0,
            data: vec![StoreRecord::Plain(entity(json!({ "id": 7 })))],
        });

        assert_eq!(result.into_first(), Some(entity(json!({ "id": 7 }))));
    }

    #[test]
    fn test_empty_results_are_none() {
        assert_eq!(FindResult::Collection(vec![]).into_first(), None);

        let empty_page = FindResult::Paginated(Page { total: 0, limit: 1, skip: 0, data: vec![] });
        assert!(empty_page.is_empty());
        assert_eq!(empty_page.into_first(), None);
    }

    #[test]
    fn test_primary_conversion_wins() {
        let record = StoreRecord::Model(Box::new(BothConversions));

        assert_eq!(record.into_entity()["via"], json!("to_object"));
    }

    #[test]
    fn test_secondary_conversion_used_alone() {
        let record = StoreRecord::Model(Box::new(JsonOnly));

        assert_eq!(record.into_entity()["via"], json!("to_json"));
    }

    #[test]
    fn test_model_without_conversion_is_plain() {
        let record = StoreRecord::Model(Box::new(NoConversion));

        assert_eq!(record.into_entity()["via"], json!("fields"));
    }
}
