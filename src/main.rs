//! OpenID 인증 데모 애플리케이션
//!
//! 호스트 애플리케이션을 구성하고 `steam` OpenID 스트래티지를 활성화한 뒤,
//! 기록된 프로필 파일을 재생하여 검증 결과를 출력합니다.
//!
//! ```bash
//! PROFILE_FILE=demo/profile.json STEAM_API_KEY=1234 STEAM_REALM=http://localhost:3030/ cargo run
//! ```

use std::sync::Arc;
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use openid_auth_backend::config::{AuthSettings, HostInfo, OpenIdOptions};
use openid_auth_backend::core::application::AuthApp;
use openid_auth_backend::core::errors::AppError;
use openid_auth_backend::db::Database;
use openid_auth_backend::domain::RequestContext;
use openid_auth_backend::repositories::{EntityStore, MemoryEntityStore, MongoEntityStore};
use openid_auth_backend::services::openid::{OpenIdAuth, ReplayStrategyFactory};
use openid_auth_backend::utils::string_utils::clean_optional_string;

const PROVIDER: &str = "steam";

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    init_logging();
    load_env_file();

    info!("🚀 OpenID 인증 데모 시작중...");

    let mut app = AuthApp::new(HostInfo::from_env());
    app.configure_authentication(AuthSettings::from_env()?);

    let plugin = OpenIdAuth::configure(&app, steam_options()?)?;

    let users = initialize_users_store(&plugin.settings().id_field).await?;
    app.use_service("users", users);

    plugin.activate(&app)?;

    match app.authenticate(PROVIDER, &RequestContext::new()).await {
        Ok(Some(verified)) => {
            info!("✅ {} 확정", plugin.settings().entity);
            println!("entity: {}", serde_json::Value::Object(verified.entity));
            if let Some(payload) = verified.payload {
                println!("payload: {}", serde_json::Value::Object(payload));
            }
        }
        Ok(None) => warn!("⚠️ 검증 결과 엔티티 없음"),
        Err(e) => {
            error!("❌ 검증 실패: {}", e);
            return Err(e);
        }
    }

    Ok(())
}

/// `steam` 프로바이더 호출 옵션을 구성합니다
///
/// # Environment Variables
///
/// * `PROFILE_FILE` - 재생할 프로필 파일 (기본값: "profile.json")
/// * `STEAM_API_KEY`, `STEAM_REALM` - 있으면 인증 설정의 값을 덮어씀
fn steam_options() -> Result<OpenIdOptions, AppError> {
    let profile_file = std::env::var("PROFILE_FILE").unwrap_or_else(|_| "profile.json".to_string());

    let mut options = OpenIdOptions::new(PROVIDER)
        .strategy(ReplayStrategyFactory::from_file(&profile_file)?);

    if let Some(api_key) = clean_optional_string(std::env::var("STEAM_API_KEY").ok()) {
        options = options.set("apiKey", api_key);
    }

    if let Some(realm) = clean_optional_string(std::env::var("STEAM_REALM").ok()) {
        options = options.set("realm", realm);
    }

    Ok(options)
}

/// `users` 엔티티 저장소를 초기화합니다
///
/// `USERS_STORE=memory` 이면 메모리 저장소를, 그 외에는 MongoDB 컬렉션을 사용합니다.
async fn initialize_users_store(id_field: &str) -> Result<Arc<dyn EntityStore>, AppError> {
    if std::env::var("USERS_STORE").is_ok_and(|store| store == "memory") {
        info!("📦 메모리 저장소 사용");
        return Ok(Arc::new(MemoryEntityStore::new()));
    }

    info!("📡 데이터베이스 연결 중...");
    let database = Database::new().await?;

    let users = MongoEntityStore::new(&database, "users");
    users.create_indexes(id_field).await?;

    Ok(Arc::new(users))
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// `.env` 로드 결과를 기록하기 위해 가장 먼저 호출되므로
/// `RUST_LOG` 는 프로세스 환경에서만 읽습니다.
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,openid_auth_backend=debug")
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,openid_auth_backend=debug"));
}
