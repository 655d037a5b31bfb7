//! 외부 OpenID 스트래티지 연동 지점
//!
//! 핸드셰이크(리다이렉트, assertion 검증, 프로필 조회)는 외부 구현이 담당합니다.
//! 이 크레이트는 유효 설정과 검증기를 넘겨 스트래티지 인스턴스를 만들고,
//! 만들어진 스트래티지를 프로바이더 이름으로 등록할 뿐입니다.

use std::sync::Arc;
use async_trait::async_trait;
use crate::config::OpenIdSettings;
use crate::domain::{RequestContext, VerifyResult};
use crate::services::openid::Verifier;

/// 등록된 인증 스트래티지
#[async_trait]
pub trait Strategy: Send + Sync {
    /// 요청을 인증합니다. 핸드셰이크가 끝나면 검증기를 호출하여 결과를 돌려줍니다.
    async fn authenticate(&self, req: &RequestContext) -> VerifyResult;
}

/// 유효 설정과 검증 콜백으로 스트래티지를 만드는 팩토리
pub trait StrategyFactory: Send + Sync {
    fn create(&self, settings: &OpenIdSettings, verifier: Arc<dyn Verifier>) -> Box<dyn Strategy>;
}

impl<F> StrategyFactory for F
where
    F: Fn(&OpenIdSettings, Arc<dyn Verifier>) -> Box<dyn Strategy> + Send + Sync,
{
    fn create(&self, settings: &OpenIdSettings, verifier: Arc<dyn Verifier>) -> Box<dyn Strategy> {
        self(settings, verifier)
    }
}
