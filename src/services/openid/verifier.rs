//! # OpenID 신원 검증기
//!
//! 외부 스트래티지가 핸드셰이크를 마치고 넘겨준 `(identifier, profile)` 을
//! 로컬 엔티티로 확정합니다.
//!
//! ## 검증 흐름
//!
//! ```text
//! verify(req, identifier, profile)
//!   │
//!   ├─ 요청 컨텍스트에 엔티티가 있음 (계정 연동)
//!   │     └─ 병합 → update → Ok(Some(entity, payload 없음))
//!   │
//!   └─ find({ [idField]: profile.id }, limit 1)
//!         ├─ 찾음   → 병합 → update
//!         └─ 없음   → create
//!               └─ Ok(Some(entity, { "{entity}Id": entity[store.id] }))
//! ```
//!
//! 성공한 호출마다 create 또는 update 가 정확히 한 번 일어납니다.
//!
//! ## 에러 정책
//!
//! | 저장소 결과 | 검증 결과 |
//! |-------------|-----------|
//! | `StoreError::Failed(e)` | `Err(e)` |
//! | `StoreError::Rejected` | `Ok(None)` |

use std::sync::Arc;
use async_trait::async_trait;
use log::{debug, error, warn};
use serde_json::Value;
use crate::config::OpenIdSettings;
use crate::core::errors::{AppError, StoreError, StoreResult};
use crate::domain::{AuthPayload, Entity, IdentityProfile, ProviderData, RequestContext, Verified, VerifyResult};
use crate::repositories::{EntityStore, StoreParams, StoreQuery};
use crate::utils::json_utils::merge_maps;

/// 검증 콜백
///
/// 외부 스트래티지는 핸드셰이크가 끝나면 이 trait 을 통해 로컬 엔티티를 확정합니다.
#[async_trait]
pub trait Verifier: Send + Sync {
    async fn verify(
        &self,
        req: Option<&RequestContext>,
        identifier: &str,
        profile: IdentityProfile,
    ) -> VerifyResult;
}

/// 활성화 시점에 검증기를 만드는 팩토리
///
/// 호출 옵션으로 커스텀 팩토리를 넘기면 [`OpenIdVerifier`] 대신 사용됩니다.
pub trait VerifierFactory: Send + Sync {
    fn create(&self, store: Arc<dyn EntityStore>, settings: &OpenIdSettings) -> Arc<dyn Verifier>;
}

impl<F> VerifierFactory for F
where
    F: Fn(Arc<dyn EntityStore>, &OpenIdSettings) -> Arc<dyn Verifier> + Send + Sync,
{
    fn create(&self, store: Arc<dyn EntityStore>, settings: &OpenIdSettings) -> Arc<dyn Verifier> {
        self(store, settings)
    }
}

/// [`OpenIdVerifier`] 를 만드는 기본 팩토리
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultVerifierFactory;

impl VerifierFactory for DefaultVerifierFactory {
    fn create(&self, store: Arc<dyn EntityStore>, settings: &OpenIdSettings) -> Arc<dyn Verifier> {
        Arc::new(OpenIdVerifier::new(store, settings.clone()))
    }
}

/// 기본 검증기
pub struct OpenIdVerifier {
    store: Arc<dyn EntityStore>,
    settings: OpenIdSettings,
}

impl OpenIdVerifier {
    pub fn new(store: Arc<dyn EntityStore>, settings: OpenIdSettings) -> Self {
        Self { store, settings }
    }

    pub fn settings(&self) -> &OpenIdSettings {
        &self.settings
    }

    fn store_params(&self) -> StoreParams {
        StoreParams::openid(&self.settings.name)
    }

    /// `{ [idField]: profile.id, [name]: { profile, identifier } }`
    fn provider_fields(&self, data: &ProviderData) -> Entity {
        let mut fields = Entity::new();
        fields.insert(self.settings.id_field.clone(), Value::String(data.profile.id.clone()));
        fields.insert(self.settings.name.clone(), data.to_value());
        fields
    }

    /// 기존 엔티티에 프로바이더 필드를 깊은 병합하고 저장합니다.
    async fn update_entity(&self, entity: &Entity, data: &ProviderData) -> StoreResult<Entity> {
        let id_field = self.store.id_field();
        let id = entity
            .get(id_field)
            .filter(|id| !id.is_null())
            .cloned()
            .ok_or_else(|| {
                AppError::ValidationError(format!(
                    "{} has no '{}' and cannot be updated",
                    self.settings.entity, id_field
                ))
            })?;

        debug!("Updating {}: {}", self.settings.entity, id);

        let mut updated = entity.clone();
        merge_maps(&mut updated, &self.provider_fields(data));

        self.store.update(&id, updated, &self.store_params()).await
    }

    async fn create_entity(&self, data: &ProviderData) -> StoreResult<Entity> {
        debug!(
            "Creating new {} with {}: {}",
            self.settings.entity, self.settings.id_field, data.profile.id
        );

        self.store
            .create(self.provider_fields(data), &self.store_params())
            .await
    }

    async fn find_or_create(&self, data: &ProviderData) -> StoreResult<Entity> {
        let query = StoreQuery::by_field(&self.settings.id_field, data.profile.id.as_str()).limit(1);

        match self.store.find(query).await?.into_first() {
            Some(entity) => {
                debug!("{} found", self.settings.entity);
                self.update_entity(&entity, data).await
            }
            None => self.create_entity(data).await,
        }
    }

    /// `{ "{entity}Id": entity[store.id] }`
    fn payload(&self, entity: &Entity) -> AuthPayload {
        let id = entity
            .get(self.store.id_field())
            .cloned()
            .unwrap_or(Value::Null);

        let mut payload = AuthPayload::new();
        payload.insert(self.settings.payload_key(), id);
        payload
    }

    fn settle(&self, failure: StoreError) -> VerifyResult {
        match failure {
            StoreError::Failed(e) => {
                error!("❌ [{}] {} 검증 실패: {}", self.settings.name, self.settings.entity, e);
                Err(e)
            }
            StoreError::Rejected => {
                warn!(
                    "⚠️ [{}] entity store rejected without an error value; completing with no {}",
                    self.settings.name, self.settings.entity
                );
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl Verifier for OpenIdVerifier {
    async fn verify(
        &self,
        req: Option<&RequestContext>,
        identifier: &str,
        profile: IdentityProfile,
    ) -> VerifyResult {
        debug!("[{}] Checking credentials", self.settings.name);
        let data = ProviderData::new(profile, identifier);

        if let Some(existing) = req.and_then(|req| req.existing_entity(&self.settings.entity)) {
            return match self.update_entity(existing, &data).await {
                Ok(entity) => Ok(Some(Verified { entity, payload: None })),
                Err(failure) => self.settle(failure),
            };
        }

        match self.find_or_create(&data).await {
            Ok(entity) => {
                let payload = self.payload(&entity);
                Ok(Some(Verified {
                    entity,
                    payload: Some(payload),
                }))
            }
            Err(failure) => self.settle(failure),
        }
    }
}
