use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use lantern_application::DEFAULT_TOAST_DURATION;
use lantern_core::AppError;
use tracing_subscriber::EnvFilter;

use crate::notification_sessions::StorageBackend;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub frontend_url: String,
    pub bootstrap_token: String,
    pub api_host: String,
    pub api_port: u16,
    pub cookie_secure: bool,
    pub notification_storage: StorageBackend,
    pub toast_duration: Duration,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
        let bootstrap_token = required_non_empty_env("AUTH_BOOTSTRAP_TOKEN")?;

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = parse_api_port(optional_env("API_PORT"))?;
        let cookie_secure = parse_cookie_secure(optional_env("SESSION_COOKIE_SECURE"))?;

        let notification_storage = match env::var("NOTIFICATION_STORAGE")
            .unwrap_or_else(|_| "memory".to_owned())
            .as_str()
        {
            "memory" => StorageBackend::Memory,
            "file" => StorageBackend::File {
                root: PathBuf::from(required_non_empty_env("NOTIFICATION_STORAGE_DIR")?),
            },
            other => {
                return Err(AppError::Validation(format!(
                    "NOTIFICATION_STORAGE must be either 'memory' or 'file', got '{other}'"
                )));
            }
        };

        let toast_duration = parse_toast_duration(optional_env("TOAST_DURATION_MS"))?;

        Ok(Self {
            frontend_url,
            bootstrap_token,
            api_host,
            api_port,
            cookie_secure,
            notification_storage,
            toast_duration,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn optional_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parse_api_port(value: Option<String>) -> Result<u16, AppError> {
    value
        .map(|value| {
            value
                .trim()
                .parse::<u16>()
                .map_err(|error| AppError::Validation(format!("invalid API_PORT: {error}")))
        })
        .transpose()
        .map(|port| port.unwrap_or(3001))
}

fn parse_cookie_secure(value: Option<String>) -> Result<bool, AppError> {
    value
        .map(|value| match value.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(AppError::Validation(format!(
                "SESSION_COOKIE_SECURE must be either 'true' or 'false', got '{other}'"
            ))),
        })
        .transpose()
        .map(|secure| secure.unwrap_or(false))
}

fn parse_toast_duration(value: Option<String>) -> Result<Duration, AppError> {
    value
        .map(|value| {
            value
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|error| {
                    AppError::Validation(format!("invalid TOAST_DURATION_MS: {error}"))
                })
        })
        .transpose()
        .map(|duration| duration.unwrap_or(DEFAULT_TOAST_DURATION))
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = required_env(name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}
