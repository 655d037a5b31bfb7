//! 기록된 프로필을 재생하는 스트래티지
//!
//! 실제 OpenID 핸드셰이크 대신, 미리 받아 둔 `(identifier, profile)` 을
//! 검증기에 그대로 전달합니다. 개발 환경 데모와 통합 테스트에서 사용합니다.
//!
//! 프로필 파일 형식:
//!
//! ```json
//! {
//!   "identifier": "https://steamcommunity.com/openid/id/76561197960287930",
//!   "profile": { "id": "76561197960287930", "displayName": "Mocky Mockerson" }
//! }
//! ```

use std::path::Path;
use std::sync::Arc;
use async_trait::async_trait;
use log::debug;
use crate::config::OpenIdSettings;
use crate::core::errors::{AppResult, ErrorContext};
use crate::domain::{IdentityProfile, ProviderData, RequestContext, VerifyResult};
use crate::services::openid::{Strategy, StrategyFactory, Verifier};

pub struct ReplayStrategy {
    settings: OpenIdSettings,
    verifier: Arc<dyn Verifier>,
    recorded: ProviderData,
}

#[async_trait]
impl Strategy for ReplayStrategy {
    async fn authenticate(&self, req: &RequestContext) -> VerifyResult {
        debug!(
            "[{}] replaying {} (return to {})",
            self.settings.name, self.recorded.identifier, self.settings.return_url
        );

        // passReqToCallback 이 꺼져 있으면 검증기는 요청 컨텍스트를 받지 않습니다.
        let req = self.settings.pass_req_to_callback.then_some(req);

        self.verifier
            .verify(req, &self.recorded.identifier, self.recorded.profile.clone())
            .await
    }
}

#[derive(Debug, Clone)]
pub struct ReplayStrategyFactory {
    recorded: ProviderData,
}

impl ReplayStrategyFactory {
    pub fn new(identifier: impl Into<String>, profile: IdentityProfile) -> Self {
        Self {
            recorded: ProviderData::new(profile, identifier),
        }
    }

    /// JSON 프로필 파일에서 재생할 데이터를 읽습니다.
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read profile file {}", path.display()))?;
        let recorded: ProviderData = serde_json::from_str(&raw)
            .with_context(|| format!("invalid profile file {}", path.display()))?;

        Ok(Self { recorded })
    }
}

impl StrategyFactory for ReplayStrategyFactory {
    fn create(&self, settings: &OpenIdSettings, verifier: Arc<dyn Verifier>) -> Box<dyn Strategy> {
        Box::new(ReplayStrategy {
            settings: settings.clone(),
            verifier,
            recorded: self.recorded.clone(),
        })
    }
}
