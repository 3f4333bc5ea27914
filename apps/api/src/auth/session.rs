use axum::Json;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use lantern_core::{AppError, UserIdentity};
use tower_sessions::Session;
use tracing::info;

use crate::dto::UserIdentityResponse;
use crate::error::ApiResult;
use crate::state::AppState;

use super::SESSION_USER_KEY;

pub async fn logout_handler(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<StatusCode> {
    let subject = session
        .get::<UserIdentity>(SESSION_USER_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read session identity: {error}")))?
        .map(|identity| identity.subject().to_owned());

    session
        .delete()
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete session: {error}")))?;

    if let Some(subject) = subject {
        state.notifications.unmount(&subject).await;
        info!(subject, "logout");
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn me_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<UserIdentityResponse>> {
    let guard = state.access_guard(&user);

    Ok(Json(UserIdentityResponse {
        subject: user.subject().to_owned(),
        display_name: user.display_name().to_owned(),
        role_claim: user.role().to_owned(),
        role_info: guard.role_info().into(),
        accessible_features: guard
            .accessible_features()
            .into_iter()
            .map(|feature| feature.as_str().to_owned())
            .collect(),
    }))
}
