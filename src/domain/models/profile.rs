//! # 외부 신원 프로필 모델
//!
//! 외부 OpenID 스트래티지가 핸드셰이크 완료 후 넘겨주는 프로필입니다.
//! `id` 외의 필드는 해석하지 않고 그대로 보존하여 로컬 엔티티에 저장합니다.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// 외부 프로바이더의 신원 프로필
///
/// `id` 는 프로바이더 범위에서 유일하며 외부 계정마다 변하지 않아야 합니다.
/// 숫자 ID를 쓰는 프로바이더도 있으므로 숫자는 문자열로 정규화합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityProfile {
    #[serde(deserialize_with = "deserialize_profile_id")]
    pub id: String,

    /// 프로바이더가 제공한 나머지 필드 (displayName, photos, _json ...)
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl IdentityProfile {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }
}

fn deserialize_profile_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(id) if !id.is_empty() => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "profile id must be a non-empty string or a number, got {}",
            other
        ))),
    }
}

/// 로컬 엔티티의 `[providerName]` 필드에 저장되는 값
///
/// 프로필과 함께 OpenID claimed identifier 를 보존합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderData {
    pub profile: IdentityProfile,
    pub identifier: String,
}

impl ProviderData {
    pub fn new(profile: IdentityProfile, identifier: impl Into<String>) -> Self {
        Self {
            profile,
            identifier: identifier.into(),
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "profile": self.profile,
            "identifier": self.identifier,
        })
    }
}
