//! 검증 결과 모델

use serde_json::{Map, Value};
use crate::core::errors::AppError;
use crate::domain::entities::Entity;

/// 인증 토큰 발급에 쓰이는 페이로드 (`{ "{entity}Id": <id> }`)
pub type AuthPayload = Map<String, Value>;

/// 검증에 성공하여 확정된 로컬 엔티티
#[derive(Debug, Clone, PartialEq)]
pub struct Verified {
    pub entity: Entity,
    /// 계정 연동 경로에서는 `None`
    pub payload: Option<AuthPayload>,
}

/// 검증 결과
///
/// - `Ok(Some(verified))` - 엔티티 확정
/// - `Ok(None)` - 엔티티 없음 (에러 아님)
/// - `Err(error)` - 조회/저장 실패
pub type VerifyResult = Result<Option<Verified>, AppError>;
