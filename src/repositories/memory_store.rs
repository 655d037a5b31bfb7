//! # 메모리 엔티티 저장소
//!
//! 프로세스 내부에 엔티티를 보관하는 저장소입니다.
//! 개발 환경과 테스트에서 MongoDB 없이 검증 흐름을 돌릴 때 사용합니다.
//!
//! - 식별자 필드는 `id` 이며 0부터 순서대로 부여됩니다.
//! - `paginated` 로 생성하면 `find` 가 페이지 봉투([`Page`])를 돌려줍니다.
//! - 모든 쓰기는 호출 파라미터와 함께 기록되어 훅 대용으로 확인할 수 있습니다.

use std::collections::BTreeMap;
use std::sync::RwLock;
use async_trait::async_trait;
use log::debug;
use serde_json::Value;
use crate::core::errors::{AppError, StoreResult};
use crate::domain::entities::{Entity, FindResult, Page, StoreRecord};
use crate::repositories::{EntityStore, StoreParams, StoreQuery};

const ID_FIELD: &str = "id";

/// 기록된 쓰기 연산
#[derive(Debug, Clone, PartialEq)]
pub enum StoreWrite {
    Create { id: u64, params: StoreParams },
    Update { id: u64, params: StoreParams },
}

#[derive(Default)]
struct MemoryState {
    records: BTreeMap<u64, Entity>,
    next_id: u64,
    writes: Vec<StoreWrite>,
}

pub struct MemoryEntityStore {
    /// 페이지 크기 (None 이면 페이지네이션 없음)
    page_size: Option<usize>,
    state: RwLock<MemoryState>,
}

impl Default for MemoryEntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryEntityStore {
    pub fn new() -> Self {
        Self {
            page_size: None,
            state: RwLock::new(MemoryState::default()),
        }
    }

    /// `find` 결과를 페이지 봉투로 감싸는 저장소를 만듭니다.
    pub fn paginated(page_size: usize) -> Self {
        Self {
            page_size: Some(page_size),
            ..Self::new()
        }
    }

    /// 현재 저장된 모든 엔티티 (식별자 순)
    pub fn snapshot(&self) -> Vec<Entity> {
        self.state
            .read()
            .map(|state| state.records.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn get(&self, id: u64) -> Option<Entity> {
        self.state
            .read()
            .ok()
            .and_then(|state| state.records.get(&id).cloned())
    }

    pub fn len(&self) -> usize {
        self.state.read().map(|state| state.records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn writes(&self) -> Vec<StoreWrite> {
        self.state
            .read()
            .map(|state| state.writes.clone())
            .unwrap_or_default()
    }

    fn lock_error() -> AppError {
        AppError::InternalError("memory store lock poisoned".to_string())
    }
}

fn parse_id(id: &Value) -> Option<u64> {
    match id {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.parse().ok(),
        _ => None,
    }
}

#[async_trait]
impl EntityStore for MemoryEntityStore {
    fn id_field(&self) -> &str {
        ID_FIELD
    }

    async fn find(&self, query: StoreQuery) -> StoreResult<FindResult> {
        let state = self.state.read().map_err(|_| Self::lock_error())?;

        let matched: Vec<&Entity> = state
            .records
            .values()
            .filter(|entity| query.matches(entity))
            .collect();
        let total = matched.len();

        let limit = match (query.limit, self.page_size) {
            (Some(limit), Some(page_size)) => limit.min(page_size),
            (Some(limit), None) => limit,
            (None, Some(page_size)) => page_size,
            (None, None) => total,
        };

        let data: Vec<StoreRecord> = matched
            .into_iter()
            .take(limit)
            .cloned()
            .map(StoreRecord::Plain)
            .collect();

        debug!("memory store find: {} of {} matched", data.len(), total);

        Ok(match self.page_size {
            Some(_) => FindResult::Paginated(Page {
                total,
                limit,
                skip: 0,
                data,
            }),
            None => FindResult::Collection(data),
        })
    }

    async fn create(&self, mut record: Entity, params: &StoreParams) -> StoreResult<Entity> {
        let mut state = self.state.write().map_err(|_| Self::lock_error())?;

        let id = match record.get(ID_FIELD).and_then(parse_id) {
            Some(id) => id,
            None => state.next_id,
        };

        if state.records.contains_key(&id) {
            return Err(AppError::ConflictError(format!("id {} already exists", id)).into());
        }

        let following = id
            .checked_add(1)
            .ok_or_else(|| AppError::ValidationError(format!("id {} is out of range", id)))?;

        state.next_id = state.next_id.max(following);
        record.insert(ID_FIELD.to_string(), Value::from(id));
        state.records.insert(id, record.clone());
        state.writes.push(StoreWrite::Create {
            id,
            params: params.clone(),
        });

        Ok(record)
    }

    async fn update(&self, id: &Value, mut record: Entity, params: &StoreParams) -> StoreResult<Entity> {
        let id = parse_id(id)
            .ok_or_else(|| AppError::ValidationError(format!("invalid id: {}", id)))?;

        let mut state = self.state.write().map_err(|_| Self::lock_error())?;

        if !state.records.contains_key(&id) {
            return Err(AppError::NotFound(format!("no record found for id '{}'", id)).into());
        }

        record.insert(ID_FIELD.to_string(), Value::from(id));
        state.records.insert(id, record.clone());
        state.writes.push(StoreWrite::Update {
            id,
            params: params.clone(),
        });

        Ok(record)
    }
}
