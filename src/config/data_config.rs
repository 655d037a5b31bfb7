//! 실행 환경 및 서버 설정 관리 모듈
//!
//! 실행 환경, 호스트/포트 설정과 이를 바탕으로 한 콜백 URL 생성을 담당합니다.

use std::env;
use crate::utils::string_utils::strip_slashes;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경 - 빠른 개발을 위한 설정
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경 - 최고 수준의 보안 및 성능
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 또는 `NODE_ENV` 환경 변수를 확인하며,
    /// 설정되지 않은 경우 `Development`를 기본값으로 사용합니다.
    pub fn current() -> Self {
        Self::from_optional(env::var("ENVIRONMENT").or_else(|_| env::var("NODE_ENV")).ok().as_deref())
    }

    /// 값이 없으면 로컬 개발 환경으로 간주합니다.
    pub fn from_optional(value: Option<&str>) -> Self {
        value.map_or(Environment::Development, Self::from_str)
    }

    /// 문자열에서 Environment를 생성합니다.
    ///
    /// 알 수 없는 값인 경우 `Production`을 반환합니다.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    /// 로컬 실행 환경(개발/테스트)인지 확인합니다.
    ///
    /// 로컬 환경에서는 콜백 URL에 `http` 와 포트 번호를 사용합니다.
    pub fn is_local(&self) -> bool {
        matches!(self, Environment::Development | Environment::Test)
    }
}

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 3030;

/// 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    /// 서버 포트를 반환합니다.
    ///
    /// # Environment Variables
    ///
    /// - `PORT`: 커스텀 포트 설정 (기본값: 3030)
    pub fn port() -> u16 {
        Self::parse_port(env::var("PORT").ok().as_deref())
    }

    /// 숫자가 아니거나 비어 있으면 기본 포트를 사용합니다.
    pub fn parse_port(value: Option<&str>) -> u16 {
        value
            .and_then(|port| port.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT)
    }

    /// 외부에서 접근 가능한 호스트 이름을 반환합니다.
    ///
    /// 콜백 URL 생성에 사용되므로 바인딩 주소(`0.0.0.0`)가 아닌
    /// 클라이언트가 접근할 수 있는 이름이어야 합니다.
    ///
    /// # Environment Variables
    ///
    /// - `HOST`: 커스텀 호스트 설정 (기본값: "localhost")
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string())
    }
}

/// 호스트 애플리케이션이 보고하는 주소 정보
///
/// OpenID 콜백 URL(`returnURL`)을 `returnPath` 로부터 유도할 때 사용됩니다.
#[derive(Debug, Clone, PartialEq)]
pub struct HostInfo {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
}

impl HostInfo {
    pub fn new(host: impl Into<String>, port: u16, environment: Environment) -> Self {
        Self {
            host: host.into(),
            port,
            environment,
        }
    }

    /// 환경 변수(`HOST`, `PORT`, `ENVIRONMENT`)로부터 생성합니다.
    ///
    /// 아무것도 설정되지 않으면 `http://localhost:3030` 기준의 로컬 개발 환경입니다.
    pub fn from_env() -> Self {
        Self::new(ServerConfig::host(), ServerConfig::port(), Environment::current())
    }

    /// 이미 읽어 둔 값으로부터 생성합니다. 빠진 값은 기본값으로 채웁니다.
    pub fn from_values(host: Option<&str>, port: Option<&str>, environment: Option<&str>) -> Self {
        Self::new(
            host.unwrap_or(DEFAULT_HOST),
            ServerConfig::parse_port(port),
            Environment::from_optional(environment),
        )
    }

    /// 경로를 절대 URL로 변환합니다.
    ///
    /// - 개발/테스트: `http://{host}:{port}/{path}`
    /// - 그 외: `https://{host}/{path}`
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let host = HostInfo::new("localhost", 3030, Environment::Development);
    /// assert_eq!(host.make_url("/auth/steam/return"), "http://localhost:3030/auth/steam/return");
    /// ```
    pub fn make_url(&self, path: &str) -> String {
        let path = strip_slashes(path);

        if self.environment.is_local() {
            format!("http://{}:{}/{}", self.host, self.port, path)
        } else {
            format!("https://{}/{}", self.host, path)
        }
    }
}

impl Default for HostInfo {
    fn default() -> Self {
        Self::from_values(None, None, None)
    }
}
