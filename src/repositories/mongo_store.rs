//! # MongoDB 엔티티 저장소
//!
//! MongoDB 컬렉션 하나를 [`EntityStore`] 로 노출합니다.
//!
//! ## 식별자
//!
//! - 식별자 필드는 `_id` 이며 MongoDB가 `ObjectId` 로 부여합니다.
//! - 검증기로 넘어가는 엔티티의 `_id` 는 24자리 16진수 문자열입니다.
//! - `update` 에 넘어온 16진수 문자열은 다시 `ObjectId` 로 변환됩니다.
//!
//! ## 문서 변환
//!
//! 조회된 문서는 [`MongoDocument`] 모델로 감싸져 반환되며,
//! 1순위 변환(`to_object`)이 BSON 을 평범한 JSON 으로 바꿉니다.
//!
//! ## 인덱스
//!
//! ```rust,ignore
//! let users = MongoEntityStore::new(&database, "users");
//! users.create_indexes("steamId").await?;
//! ```

use async_trait::async_trait;
use futures_util::TryStreamExt;
use log::{debug, info};
use mongodb::{
    bson::{doc, oid::ObjectId, Bson, Document},
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    Collection, IndexModel,
};
use serde_json::{Map, Value};
use crate::core::errors::{AppError, AppResult, ErrorContext, StoreResult};
use crate::db::Database;
use crate::domain::entities::{Entity, FindResult, ModelRecord, StoreRecord};
use crate::repositories::{EntityStore, StoreParams, StoreQuery};

const ID_FIELD: &str = "_id";
const DUPLICATE_KEY: i32 = 11000;

/// 조회된 MongoDB 문서
#[derive(Debug)]
pub struct MongoDocument(pub Document);

impl ModelRecord for MongoDocument {
    fn to_object(&self) -> Option<Entity> {
        match bson_to_json(Bson::Document(self.0.clone())) {
            Value::Object(entity) => Some(entity),
            _ => None,
        }
    }

    fn fields(&self) -> Entity {
        match Bson::Document(self.0.clone()).into_relaxed_extjson() {
            Value::Object(entity) => entity,
            _ => Entity::new(),
        }
    }
}

/// BSON 값을 평범한 JSON 으로 변환합니다. `ObjectId` 는 16진수 문자열이 됩니다.
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::Document(document) => Value::Object(
            document
                .into_iter()
                .map(|(key, value)| (key, bson_to_json(value)))
                .collect::<Map<String, Value>>(),
        ),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

/// JSON 식별자를 BSON 으로 변환합니다.
///
/// `ObjectId` 로 해석되는 문자열은 `ObjectId` 로, 나머지는 값 그대로 변환합니다.
pub fn json_id_to_bson(id: &Value) -> AppResult<Bson> {
    if let Value::String(text) = id {
        if let Ok(oid) = ObjectId::parse_str(text) {
            return Ok(Bson::ObjectId(oid));
        }
    }

    mongodb::bson::to_bson(id).context("failed to convert id to BSON")
}

fn map_write_error(error: mongodb::error::Error) -> AppError {
    if let ErrorKind::Write(WriteFailure::WriteError(ref write_error)) = *error.kind {
        if write_error.code == DUPLICATE_KEY {
            return AppError::ConflictError(write_error.message.clone());
        }
    }

    AppError::DatabaseError(error.to_string())
}

pub struct MongoEntityStore {
    collection: Collection<Document>,
}

impl MongoEntityStore {
    pub fn new(database: &Database, collection: &str) -> Self {
        Self {
            collection: database.get_database().collection::<Document>(collection),
        }
    }

    pub fn collection_name(&self) -> &str {
        self.collection.name()
    }

    /// 프로바이더 식별자 필드에 유니크 인덱스를 생성합니다.
    ///
    /// 해당 프로바이더로 로그인하지 않은 엔티티는 필드가 없으므로 sparse 인덱스를 씁니다.
    /// 동시에 같은 외부 계정으로 처음 로그인하는 경우 두 번째 생성은 `ConflictError` 로 실패합니다.
    pub async fn create_indexes(&self, id_field: &str) -> AppResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { id_field: 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .sparse(true)
                .name(format!("{}_unique", id_field))
                .build())
            .build();

        self.collection
            .create_index(index)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        info!("✅ {} 인덱스 생성 완료: {}", self.collection.name(), id_field);
        Ok(())
    }

    fn to_filter(query: &StoreQuery) -> AppResult<Document> {
        let mut filter = mongodb::bson::to_document(&query.filter)
            .context("failed to convert query to BSON")?;

        if let Some(id) = query.filter.get(ID_FIELD) {
            filter.insert(ID_FIELD, json_id_to_bson(id)?);
        }

        Ok(filter)
    }
}

#[async_trait]
impl EntityStore for MongoEntityStore {
    fn id_field(&self) -> &str {
        ID_FIELD
    }

    async fn find(&self, query: StoreQuery) -> StoreResult<FindResult> {
        let filter = Self::to_filter(&query)?;

        let mut action = self.collection.find(filter);
        if let Some(limit) = query.limit {
            action = action.limit(limit as i64);
        }

        let documents: Vec<Document> = action
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        debug!("{} find: {} documents", self.collection.name(), documents.len());

        Ok(FindResult::Collection(
            documents
                .into_iter()
                .map(|document| StoreRecord::Model(Box::new(MongoDocument(document))))
                .collect(),
        ))
    }

    async fn create(&self, mut record: Entity, params: &StoreParams) -> StoreResult<Entity> {
        record.remove(ID_FIELD);
        let document = mongodb::bson::to_document(&record)
            .context("failed to convert entity to BSON")?;

        let result = self.collection
            .insert_one(document)
            .await
            .map_err(map_write_error)?;

        let id = bson_to_json(result.inserted_id);
        debug!(
            "{} created {} (provider: {:?})",
            self.collection.name(),
            id,
            params.provider()
        );

        record.insert(ID_FIELD.to_string(), id);
        Ok(record)
    }

    async fn update(&self, id: &Value, mut record: Entity, params: &StoreParams) -> StoreResult<Entity> {
        let object_id = json_id_to_bson(id)?;

        record.remove(ID_FIELD);
        let document = mongodb::bson::to_document(&record)
            .context("failed to convert entity to BSON")?;

        let result = self.collection
            .replace_one(doc! { ID_FIELD: object_id }, document)
            .await
            .map_err(map_write_error)?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!("no record found for id '{}'", id)).into());
        }

        debug!(
            "{} updated {} (provider: {:?})",
            self.collection.name(),
            id,
            params.provider()
        );

        record.insert(ID_FIELD.to_string(), id.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_ids_become_hex_strings() {
        let oid = ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap();
        let document = doc! {
            "_id": oid,
            "steamId": "p1",
            "steam": { "profile": { "id": "p1" }, "tags": ["a", "b"] },
        };

        let entity = MongoDocument(document).to_object().unwrap();

        assert_eq!(entity["_id"], json!("507f1f77bcf86cd799439011"));
        assert_eq!(entity["steam"]["profile"]["id"], json!("p1"));
        assert_eq!(entity["steam"]["tags"], json!(["a", "b"]));
    }

    #[test]
    fn test_primary_conversion_used_by_normalization() {
        let oid = ObjectId::new();
        let record = StoreRecord::Model(Box::new(MongoDocument(doc! { "_id": oid })));

        assert_eq!(record.into_entity()["_id"], json!(oid.to_hex()));
    }

    #[test]
    fn test_hex_ids_convert_back_to_object_ids() {
        let id = json_id_to_bson(&json!("507f1f77bcf86cd799439011")).unwrap();
        assert!(matches!(id, Bson::ObjectId(_)));

        let id = json_id_to_bson(&json!("custom-id")).unwrap();
        assert_eq!(id, Bson::String("custom-id".to_string()));

        let id = json_id_to_bson(&json!(7)).unwrap();
        assert!(matches!(id, Bson::Int32(7) | Bson::Int64(7)));
    }

    #[test]
    fn test_filter_converts_id_field() {
        let query = StoreQuery::by_field("_id", "507f1f77bcf86cd799439011").limit(1);

        let filter = MongoEntityStore::to_filter(&query).unwrap();

        assert!(matches!(filter.get("_id"), Some(Bson::ObjectId(_))));
    }
}
