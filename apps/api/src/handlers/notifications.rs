use std::str::FromStr;

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use chrono::Utc;
use lantern_core::{NonEmptyString, UserIdentity};
use lantern_domain::{NotificationId, NotificationType};

use crate::dto::{
    CreateNotificationRequest, CreateNotificationResponse, NotificationListResponse,
    NotificationResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;


pub async fn list_notifications_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<NotificationListResponse>> {
    let now = Utc::now();
    let response = state
        .notifications
        .with_store(user.subject(), |store| NotificationListResponse {
            notifications: store
                .notifications()
                .iter()
                .map(|item| NotificationResponse::from_item(item, now))
                .collect(),
            unread_count: u32::try_from(store.unread_count()).unwrap_or(u32::MAX),
            badge: store.badge_label(),
        })
        .await?;

    Ok(Json(response))
}

pub async fn create_notification_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<CreateNotificationRequest>,
) -> ApiResult<(StatusCode, Json<CreateNotificationResponse>)> {
    let title = NonEmptyString::new(payload.title.trim())?;
    let kind = NotificationType::from_str(payload.kind.trim())?;

    let id = state
        .notifications
        .with_store(user.subject(), |store| {
            store.add_notification(title.as_str(), payload.description, kind)
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateNotificationResponse {
            id: id.as_str().to_owned(),
        }),
    ))
}

pub async fn mark_notification_read_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(notification_id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = NotificationId::from_string(notification_id);
    state
        .notifications
        .with_store(user.subject(), |store| store.mark_as_read(&id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn mark_all_notifications_read_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<StatusCode> {
    state
        .notifications
        .with_store(user.subject(), |store| store.mark_all_as_read())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_notification_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(notification_id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = NotificationId::from_string(notification_id);
    state
        .notifications
        .with_store(user.subject(), |store| store.remove_notification(&id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn clear_notifications_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<StatusCode> {
    state
        .notifications
        .with_store(user.subject(), |store| store.clear_all())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
