/*
 * Responsibility
 * - 環境変数の読み込み (署名シークレット、CORS、イベントバス、アップロード上限など)
 * - 設定値のバリデーション (不正なら起動失敗)
 * - イベントバス未設定は起動失敗にしない (emitter が無効化されるだけ)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_CORS_ORIGINS: &[&str] = &["http://localhost:3000", "http://localhost:9004"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Destination names of the two event variants on the message bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTopics {
    pub portfolio: String,
    pub trade: String,
}

impl Default for EventTopics {
    fn default() -> Self {
        Self {
            portfolio: "am-portfolio-update".to_string(),
            trade: "am-trade-update".to_string(),
        }
    }
}

pub struct Config {
    pub addr: SocketAddr,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    // Absent means every protected request is rejected.
    pub jwt_secret: Option<String>,
    pub access_token_leeway_seconds: u64,

    pub event_bus_url: Option<String>,
    pub event_topics: EventTopics,

    pub max_upload_bytes: usize,
    pub request_timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print the signing secret
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("jwt_secret_configured", &self.jwt_secret.is_some())
            .field("access_token_leeway_seconds", &self.access_token_leeway_seconds)
            .field("event_bus_configured", &self.event_bus_url.is_some())
            .field("event_topics", &self.event_topics)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = match non_blank_env("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 8080,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let cors_allowed_origins = parse_origins(
            &std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default(),
            app_env,
        );

        let jwt_secret = non_blank_env("AUTH_JWT_SECRET");

        let access_token_leeway_seconds = parse_or("ACCESS_TOKEN_LEEWAY_SECONDS", 60u64)?;

        let event_bus_url = non_blank_env("EVENT_BUS_URL");

        let defaults = EventTopics::default();
        let event_topics = EventTopics {
            portfolio: non_blank_env("EVENT_PORTFOLIO_TOPIC").unwrap_or(defaults.portfolio),
            trade: non_blank_env("EVENT_TRADE_TOPIC").unwrap_or(defaults.trade),
        };

        let max_upload_bytes = parse_or("MAX_UPLOAD_BYTES", 16 * 1024 * 1024usize)?;
        if max_upload_bytes == 0 {
            return Err(ConfigError::Invalid("MAX_UPLOAD_BYTES"));
        }

        let timeout_seconds = parse_or("REQUEST_TIMEOUT_SECONDS", 30u64)?;
        if timeout_seconds == 0 {
            return Err(ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS"));
        }

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            jwt_secret,
            access_token_leeway_seconds,
            event_bus_url,
            event_topics,
            max_upload_bytes,
            request_timeout: Duration::from_secs(timeout_seconds),
        })
    }
}

fn non_blank_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match non_blank_env(key) {
        Some(v) => v.parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

// Development falls back to the local frontends; production never gets a default allowlist.
fn parse_origins(raw: &str, app_env: AppEnv) -> Vec<String> {
    let origins = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>();

    if origins.is_empty() && !app_env.is_production() {
        return DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect();
    }
    origins
}
