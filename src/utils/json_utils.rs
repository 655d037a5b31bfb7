//! # JSON 값 유틸리티
//!
//! 설정 계층 병합과 엔티티 병합에 사용되는 `serde_json::Value` 헬퍼입니다.

use serde_json::{Map, Value};

/// `source` 를 `target` 에 깊은 병합(deep merge)합니다.
///
/// - 양쪽이 모두 객체이면 키 단위로 재귀 병합합니다.
/// - 양쪽이 모두 배열이면 인덱스 단위로 재귀 병합합니다.
/// - 그 외에는 `source` 값이 `target` 값을 덮어씁니다.
///
/// # 예제
///
/// ```rust,ignore
/// let mut target = json!({ "scope": { "a": 1 }, "realm": "x" });
/// deep_merge(&mut target, &json!({ "scope": { "b": 2 } }));
/// assert_eq!(target, json!({ "scope": { "a": 1, "b": 2 }, "realm": "x" }));
/// ```
pub fn deep_merge(target: &mut Value, source: &Value) {
    match (target, source) {
        (Value::Object(target_map), Value::Object(source_map)) => {
            merge_maps(target_map, source_map);
        }
        (Value::Array(target_items), Value::Array(source_items)) => {
            for (index, item) in source_items.iter().enumerate() {
                match target_items.get_mut(index) {
                    Some(existing) => deep_merge(existing, item),
                    None => target_items.push(item.clone()),
                }
            }
        }
        (target, source) => {
            *target = source.clone();
        }
    }
}

/// 객체 두 개를 깊은 병합합니다. [`deep_merge`] 의 객체 전용 버전입니다.
pub fn merge_maps(target: &mut Map<String, Value>, source: &Map<String, Value>) {
    for (key, value) in source {
        match target.get_mut(key) {
            Some(existing) => deep_merge(existing, value),
            None => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

/// JSON 값이 "참으로 평가되는" 값인지 확인합니다.
///
/// `null`, `false`, `0`, 빈 문자열은 거짓으로 간주합니다.
/// 필수 설정값(apiKey, realm 등)의 존재 여부 판단에 사용됩니다.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deep_merge_nested_objects() {
        let mut target = json!({ "scope": { "a": 1 }, "realm": "x" });
        deep_merge(&mut target, &json!({ "scope": { "b": 2 }, "realm": "y" }));

        assert_eq!(target, json!({ "scope": { "a": 1, "b": 2 }, "realm": "y" }));
    }

    #[test]
    fn test_deep_merge_arrays_by_index() {
        let mut target = json!(["user", "email"]);
        deep_merge(&mut target, &json!(["admin"]));

        assert_eq!(target, json!(["admin", "email"]));
    }

    #[test]
    fn test_deep_merge_scalar_replaces_object() {
        let mut target = json!({ "session": { "cookie": true } });
        deep_merge(&mut target, &json!({ "session": false }));

        assert_eq!(target, json!({ "session": false }));
    }

    #[test]
    fn test_is_truthy() {
        assert!(!is_truthy(&Value::Null));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(false)));
        assert!(is_truthy(&json!("1234")));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!({})));
    }
}
