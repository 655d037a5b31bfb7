//! # Application Error Handling System
//!
//! OpenID 인증 백엔드의 통합 에러 처리 시스템입니다.
//! 에러는 발생 시점에 따라 세 계층으로 나뉩니다.
//!
//! | 계층 | 타입 | 발생 시점 | 처리 방식 |
//! |------|------|-----------|-----------|
//! | 설정 | [`ConfigError`] | 활성화(activation) 시점 | 즉시 실패, 스트래티지 등록 중단 |
//! | 저장소 | [`StoreError`] | 요청 처리 중 | 검증 결과로 전달 |
//! | 애플리케이션 | [`AppError`] | 요청 처리 중 | HTTP 응답으로 변환 가능 |
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status |
//! |----------|-------------|
//! | `ValidationError` | 400 Bad Request |
//! | `NotFound` | 404 Not Found |
//! | `ConflictError` | 409 Conflict |
//! | `AuthenticationError` | 401 Unauthorized |
//! | 그 외 (`Configuration` 포함) | 500 Internal Server Error |
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::core::errors::{AppError, StoreError};
//!
//! let docs = collection.find(filter).await
//!     .map_err(|e| StoreError::Failed(AppError::DatabaseError(e.to_string())))?;
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 요청 처리 중 발생하는 모든 런타임 에러를 포괄합니다.
/// 설정 에러는 `Configuration` 변형으로 감싸져 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    ///
    /// 식별자가 없는 엔티티를 업데이트하려는 경우 등에 사용됩니다.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러 (409 Conflict)
    ///
    /// 저장소의 유니크 제약 조건 위반 시 발생합니다.
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 에러 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 외부 서비스 에러 (500 Internal Server Error)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 설정 에러 (500 Internal Server Error)
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 호스트 애플리케이션이 검증 실패를 그대로 반환할 때 사용되며,
    /// 모든 에러는 `{ "error": "..." }` 형식의 JSON으로 변환됩니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::http::StatusCode;

        let status = match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

/// 설정 단계 에러
///
/// 스트래티지 설정 해석(resolve) 및 활성화(activate) 단계에서만 발생합니다.
/// 이 에러가 발생하면 스트래티지나 검증기는 어떤 것도 등록되지 않습니다.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// 호스트 앱에 인증 계층이 초기화되지 않음
    #[error("authentication is not initialized on the host application; configure authentication before the OpenID strategy")]
    AuthenticationNotInitialized,

    #[error("missing strategy name: you must provide a strategy 'name'")]
    MissingStrategyName,

    #[error("missing Strategy: you must provide an OpenID strategy implementation")]
    MissingStrategy,

    #[error("missing apiKey: provide an 'apiKey' in the authentication settings or pass one explicitly")]
    MissingApiKey,

    #[error("missing realm: provide a 'realm' in the authentication settings or pass one explicitly")]
    MissingRealm,

    /// 엔티티 저장소 참조가 전혀 지정되지 않음
    #[error("missing service: no entity store reference was configured")]
    MissingService,

    /// 이름으로 지정된 저장소가 호스트에 등록되어 있지 않음
    #[error("service '{0}' does not exist; register the entity store before activating the OpenID strategy")]
    ServiceNotFound(String),

    /// 병합된 설정이 기대한 형태가 아님 (예: `session`이 불리언이 아님)
    #[error("invalid OpenID settings: {0}")]
    InvalidSettings(String),

    /// 환경 변수 또는 설정 파일 로드 실패
    #[error("environment configuration error: {0}")]
    Environment(String),
}

/// 엔티티 저장소 연산 에러
///
/// 저장소 어댑터는 에러 값과 함께 실패하거나(`Failed`),
/// 에러 값 없이 거부(`Rejected`)할 수 있습니다.
/// 후자는 일부 어댑터의 "결과 없음" 관례를 위한 호환용이며,
/// 검증기 외의 새로운 호출 지점에서는 사용하지 않습니다.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Failed(#[from] AppError),

    #[error("store operation was rejected without an error value")]
    Rejected,
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 저장소 연산 Result 타입 별칭
pub type StoreResult<T> = Result<T, StoreError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}
