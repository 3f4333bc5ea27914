use chrono::{DateTime, SecondsFormat, Utc};
use lantern_domain::{NotificationItem, relative_time_label};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Incoming payload for adding a notification.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-notification-request.ts"
)]
pub struct CreateNotificationRequest {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Response for a newly added notification.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-notification-response.ts"
)]
pub struct CreateNotificationResponse {
    pub id: String,
}

/// API representation of a notification.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/notification-response.ts"
)]
pub struct NotificationResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub read: bool,
    pub timestamp: String,
    pub relative_time: String,
}

impl NotificationResponse {
    pub fn from_item(item: &NotificationItem, now: DateTime<Utc>) -> Self {
        Self {
            id: item.id().as_str().to_owned(),
            title: item.title().to_owned(),
            description: item.description().to_owned(),
            kind: item.kind().as_str().to_owned(),
            read: item.is_read(),
            timestamp: item.timestamp().to_rfc3339_opts(SecondsFormat::Millis, true),
            relative_time: relative_time_label(item.timestamp(), now),
        }
    }
}

/// Notification bell contents.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/notification-list-response.ts"
)]
pub struct NotificationListResponse {
    pub notifications: Vec<NotificationResponse>,
    pub unread_count: u32,
    /// Badge text for the bell icon, absent when nothing is unread.
    pub badge: Option<String>,
}
