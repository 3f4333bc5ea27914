use std::time::Duration;

use lantern_core::AppResult;
use lantern_domain::NotificationType;

/// Durable key/value storage scoped to one client profile.
pub trait LocalStorage: Send + Sync {
    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Replaces the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> AppResult<()>;
}

/// Transient pop-up shown when a notification is added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Visual intent.
    pub kind: NotificationType,
    /// Headline.
    pub title: String,
    /// Body text.
    pub description: String,
    /// How long the toast stays visible before dismissing itself.
    pub duration: Duration,
}

/// Surface that displays toasts.
pub trait ToastSink: Send + Sync {
    /// Displays a toast. Called synchronously from the notification store.
    fn show(&self, toast: &Toast);
}
