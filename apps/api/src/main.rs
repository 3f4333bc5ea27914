//! Lantern API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod auth;
mod dto;
mod error;
mod handlers;
mod middleware;
mod notification_sessions;
mod state;

use std::sync::Arc;

use lantern_core::AppError;
use lantern_domain::RoleCatalog;
use lantern_infrastructure::TracingToastSink;
use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
use tracing::info;

use crate::api_config::{ApiConfig, init_tracing};
use crate::notification_sessions::NotificationSessions;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let role_catalog = RoleCatalog::builtin();
    role_catalog.validate_features()?;

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(config.cookie_secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(30)));

    let notifications = NotificationSessions::new(
        config.notification_storage.clone(),
        Arc::new(TracingToastSink::new()),
        config.toast_duration,
    );

    let app_state = AppState {
        role_catalog: Arc::new(role_catalog),
        notifications,
        frontend_url: config.frontend_url.clone(),
        bootstrap_token: config.bootstrap_token.clone(),
    };

    let app = api_router::build_router(app_state, &config.frontend_url, session_layer)?;

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(
        %address,
        storage = ?config.notification_storage,
        toast_duration_ms = config.toast_duration.as_millis(),
        "lantern-api listening"
    );

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
