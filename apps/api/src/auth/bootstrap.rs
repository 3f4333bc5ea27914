use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use lantern_core::{AppError, NonEmptyString, UserIdentity};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::info;

use crate::error::ApiResult;
use crate::state::AppState;

use super::SESSION_USER_KEY;

#[derive(Debug, Deserialize)]
pub struct BootstrapRequest {
    pub subject: String,
    pub display_name: Option<String>,
    pub role: String,
    pub token: String,
}

pub async fn bootstrap_handler(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<BootstrapRequest>,
) -> ApiResult<StatusCode> {
    if payload.token != state.bootstrap_token {
        return Err(AppError::Unauthorized("invalid bootstrap token".to_owned()).into());
    }

    let subject = NonEmptyString::new(payload.subject.trim())?;
    let display_name = payload
        .display_name
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| subject.as_str().to_owned());
    let identity = UserIdentity::new(subject.as_str(), display_name, payload.role.trim());

    session
        .cycle_id()
        .await
        .map_err(|error| AppError::Internal(format!("failed to cycle session id: {error}")))?;

    session
        .insert(SESSION_USER_KEY, &identity)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to persist session identity: {error}"))
        })?;

    state.notifications.mount(identity.subject()).await?;

    info!(
        subject = identity.subject(),
        role = identity.role(),
        "bootstrap login"
    );

    Ok(StatusCode::NO_CONTENT)
}
