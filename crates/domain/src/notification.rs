use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use lantern_core::AppError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const ID_SUFFIX_LENGTH: usize = 9;
const RELATIVE_LABEL_MAX_DAYS: i64 = 7;
const BADGE_LABEL_LIMIT: usize = 9;

/// Identifier for a notification: creation time in epoch milliseconds plus a
/// random suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(String);

impl NotificationId {
    /// Generates a fresh identifier for a notification created at `created_at`.
    #[must_use]
    pub fn generate(created_at: DateTime<Utc>) -> Self {
        let random = Uuid::new_v4().simple().to_string();
        let suffix = &random[..ID_SUFFIX_LENGTH];
        Self(format!("{}-{suffix}", created_at.timestamp_millis()))
    }

    /// Wraps an identifier received from a caller.
    #[must_use]
    pub fn from_string(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for NotificationId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Visual intent of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    /// Operation completed.
    Success,
    /// Operation failed.
    Error,
    /// Something needs attention.
    Warning,
    /// Neutral information.
    Info,
}

impl NotificationType {
    /// Returns a stable storage value for this notification type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl FromStr for NotificationType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            "warning" => Ok(Self::Warning),
            "info" => Ok(Self::Info),
            _ => Err(AppError::Validation(format!(
                "unknown notification type '{value}'"
            ))),
        }
    }
}

/// One entry in the notification bell.
///
/// Serialized field names match the persisted client format, with the
/// timestamp written as an RFC 3339 string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationItem {
    id: NotificationId,
    title: String,
    description: String,
    #[serde(rename = "type")]
    kind: NotificationType,
    read: bool,
    timestamp: DateTime<Utc>,
}

impl NotificationItem {
    /// Creates an unread notification with a freshly generated identifier.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        kind: NotificationType,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: NotificationId::generate(timestamp),
            title: title.into(),
            description: description.into(),
            kind,
            read: false,
            timestamp,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub fn id(&self) -> &NotificationId {
        &self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Returns the notification type.
    #[must_use]
    pub fn kind(&self) -> NotificationType {
        self.kind
    }

    /// Returns whether the notification has been read.
    #[must_use]
    pub fn is_read(&self) -> bool {
        self.read
    }

    /// Returns the creation instant.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Marks the notification as read.
    pub fn mark_read(&mut self) {
        self.read = true;
    }
}

/// Formats how long ago `timestamp` happened relative to `now`.
///
/// Timestamps older than a week fall back to a `M/D/YYYY` date.
#[must_use]
pub fn relative_time_label(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(timestamp);
    let seconds = elapsed.num_seconds().max(0);

    if seconds < 60 {
        return format!("{seconds} sec ago");
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{minutes} min ago");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours} hr ago");
    }

    let days = hours / 24;
    if days <= RELATIVE_LABEL_MAX_DAYS {
        return if days == 1 {
            "1 day ago".to_owned()
        } else {
            format!("{days} days ago")
        };
    }

    timestamp.format("%-m/%-d/%Y").to_string()
}

/// Formats the unread badge shown on the bell icon.
///
/// Returns `None` when nothing is unread.
#[must_use]
pub fn unread_badge_label(unread_count: usize) -> Option<String> {
    match unread_count {
        0 => None,
        count if count > BADGE_LABEL_LIMIT => Some(format!("{BADGE_LABEL_LIMIT}+")),
        count => Some(count.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use proptest::prelude::*;

    use super::{
        NotificationId, NotificationItem, NotificationType, relative_time_label,
        unread_badge_label,
    };

    #[test]
    fn generated_ids_carry_millis_and_suffix() {
        let created_at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).single();
        assert!(created_at.is_some());
        let created_at = created_at.unwrap_or_else(|| unreachable!());

        let id = NotificationId::generate(created_at);
        let (millis, suffix) = id.as_str().split_once('-').unwrap_or_default();
        assert_eq!(millis, created_at.timestamp_millis().to_string());
        assert_eq!(suffix.len(), 9);
        assert!(suffix.chars().all(|value| value.is_ascii_alphanumeric()));
    }

    #[test]
    fn persisted_shape_uses_type_and_iso_timestamp() {
        let timestamp = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).single();
        assert!(timestamp.is_some());
        let item = NotificationItem::new(
            "Saved",
            "Your changes were saved",
            NotificationType::Success,
            timestamp.unwrap_or_else(|| unreachable!()),
        );

        let value = serde_json::to_value(&item).unwrap_or_default();
        assert_eq!(value["type"], "success");
        assert_eq!(value["read"], false);
        assert_eq!(value["timestamp"], "2026-03-01T09:30:00Z");
        assert_eq!(value["id"], item.id().as_str());
    }

    #[test]
    fn decoding_restores_the_same_instant() {
        let raw = r#"{"id":"1-abc","title":"T","description":"D","type":"warning","read":true,"timestamp":"2026-03-01T09:30:00.123Z"}"#;
        let item = serde_json::from_str::<NotificationItem>(raw);
        assert!(item.is_ok());

        let item = item.unwrap_or_else(|_| unreachable!());
        assert_eq!(item.kind(), NotificationType::Warning);
        assert!(item.is_read());
        assert_eq!(item.timestamp().timestamp_millis() % 1000, 123);
    }

    #[test]
    fn relative_labels_step_through_units() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).single();
        assert!(now.is_some());
        let now = now.unwrap_or_else(|| unreachable!());

        assert_eq!(relative_time_label(now - Duration::seconds(5), now), "5 sec ago");
        assert_eq!(relative_time_label(now - Duration::minutes(3), now), "3 min ago");
        assert_eq!(relative_time_label(now - Duration::hours(2), now), "2 hr ago");
        assert_eq!(relative_time_label(now - Duration::days(1), now), "1 day ago");
        assert_eq!(relative_time_label(now - Duration::days(7), now), "7 days ago");
        assert_eq!(relative_time_label(now - Duration::days(8), now), "3/2/2026");
    }

    #[test]
    fn future_timestamps_clamp_to_zero() {
        let now = Utc::now();
        assert_eq!(
            relative_time_label(now + Duration::seconds(30), now),
            "0 sec ago"
        );
    }

    #[test]
    fn badge_caps_at_nine_plus() {
        assert_eq!(unread_badge_label(0), None);
        assert_eq!(unread_badge_label(1).as_deref(), Some("1"));
        assert_eq!(unread_badge_label(9).as_deref(), Some("9"));
        assert_eq!(unread_badge_label(10).as_deref(), Some("9+"));
    }

    proptest! {
        #[test]
        fn badge_label_is_never_wider_than_two_characters(count in 0_usize..10_000) {
            let label = unread_badge_label(count);
            prop_assert_eq!(label.is_none(), count == 0);
            prop_assert!(label.map(|value| value.len() <= 2).unwrap_or(true));
        }

        #[test]
        fn sub_minute_ages_are_labelled_in_seconds(seconds in 0_i64..60) {
            let now = Utc::now();
            let label = relative_time_label(now - Duration::seconds(seconds), now);
            prop_assert_eq!(label, format!("{seconds} sec ago"));
        }
    }
}
