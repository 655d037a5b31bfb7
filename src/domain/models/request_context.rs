//! 요청 컨텍스트 모델

use serde_json::{Map, Value};
use crate::domain::entities::Entity;

/// 호스트 애플리케이션이 검증기에 넘기는 요청 컨텍스트
///
/// 이미 인증된 세션이라면 호스트가 엔티티를 `attributes` (요청 객체 자체)
/// 또는 `params` (훅/서비스 호출 파라미터)에 올려 둡니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestContext {
    /// 요청 객체에 직접 붙은 값들
    pub attributes: Map<String, Value>,
    /// 중첩된 파라미터 객체
    pub params: Map<String, Value>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    pub fn with_param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// 이미 인증된 엔티티를 찾습니다.
    ///
    /// 요청 객체를 먼저 확인하고, 없으면 `params` 를 확인합니다.
    /// 객체가 아닌 값은 엔티티로 취급하지 않습니다.
    pub fn existing_entity(&self, entity_name: &str) -> Option<&Entity> {
        self.attributes
            .get(entity_name)
            .and_then(Value::as_object)
            .or_else(|| self.params.get(entity_name).and_then(Value::as_object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entity_on_request_takes_priority() {
        let req = RequestContext::new()
            .with_attribute("user", json!({ "id": 1 }))
            .with_param("user", json!({ "id": 2 }));

        assert_eq!(req.existing_entity("user").unwrap()["id"], json!(1));
    }

    #[test]
    fn test_entity_in_params() {
        let req = RequestContext::new().with_param("user", json!({ "id": 2 }));

        assert_eq!(req.existing_entity("user").unwrap()["id"], json!(2));
        assert!(req.existing_entity("organization").is_none());
    }

    #[test]
    fn test_non_object_values_are_ignored() {
        let req = RequestContext::new()
            .with_attribute("user", Value::Null)
            .with_param("user", json!("not-an-entity"));

        assert!(req.existing_entity("user").is_none());
    }
}
