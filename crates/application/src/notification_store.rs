//! Client-session notification list with local persistence.
//!
//! The store exclusively owns its list and is mutated through `&mut self`.
//! Each mutation rewrites the whole list under [`NOTIFICATION_STORAGE_KEY`].
//! Storage failures are logged and never surface to callers.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use lantern_domain::{NotificationId, NotificationItem, NotificationType, unread_badge_label};
use tracing::warn;

use crate::notification_ports::{LocalStorage, Toast, ToastSink};

/// Storage key holding the serialized notification list.
pub const NOTIFICATION_STORAGE_KEY: &str = "lantern.notifications";

/// Default toast visibility.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(5_000);

/// Notification list for one client session, newest first.
pub struct NotificationStore {
    items: Vec<NotificationItem>,
    storage: Arc<dyn LocalStorage>,
    toasts: Arc<dyn ToastSink>,
    toast_duration: Duration,
}

impl NotificationStore {
    /// Loads the persisted list, starting empty if it is missing or unreadable.
    #[must_use]
    pub fn load(
        storage: Arc<dyn LocalStorage>,
        toasts: Arc<dyn ToastSink>,
        toast_duration: Duration,
    ) -> Self {
        let items = read_persisted(storage.as_ref());

        Self {
            items,
            storage,
            toasts,
            toast_duration,
        }
    }

    /// Returns the notifications, newest first.
    #[must_use]
    pub fn notifications(&self) -> &[NotificationItem] {
        &self.items
    }

    /// Returns the number of unread notifications.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|item| !item.is_read()).count()
    }

    /// Returns the bell badge label for the current unread count.
    #[must_use]
    pub fn badge_label(&self) -> Option<String> {
        unread_badge_label(self.unread_count())
    }

    /// Adds an unread notification at the head of the list and shows a toast.
    pub fn add_notification(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        kind: NotificationType,
    ) -> NotificationId {
        let item = NotificationItem::new(title, description, kind, Utc::now());
        let id = item.id().clone();
        let toast = Toast {
            kind,
            title: item.title().to_owned(),
            description: item.description().to_owned(),
            duration: self.toast_duration,
        };

        self.items.insert(0, item);
        self.persist();
        self.toasts.show(&toast);

        id
    }

    /// Marks one notification as read. Unknown ids are ignored.
    pub fn mark_as_read(&mut self, id: &NotificationId) {
        let Some(item) = self.items.iter_mut().find(|item| item.id() == id) else {
            return;
        };

        item.mark_read();
        self.persist();
    }

    /// Marks every notification as read.
    pub fn mark_all_as_read(&mut self) {
        self.items.iter_mut().for_each(NotificationItem::mark_read);
        self.persist();
    }

    /// Removes one notification. Unknown ids are ignored.
    pub fn remove_notification(&mut self, id: &NotificationId) {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);

        if self.items.len() != before {
            self.persist();
        }
    }

    /// Removes every notification.
    pub fn clear_all(&mut self) {
        self.items.clear();
        self.persist();
    }

    fn persist(&self) {
        let encoded = match serde_json::to_string(&self.items) {
            Ok(encoded) => encoded,
            Err(error) => {
                warn!(error = %error, "failed to encode notifications, keeping in-memory state");
                return;
            }
        };

        if let Err(error) = self.storage.set(NOTIFICATION_STORAGE_KEY, &encoded) {
            warn!(
                error = %error,
                count = self.items.len(),
                "failed to persist notifications, keeping in-memory state"
            );
        }
    }
}

fn read_persisted(storage: &dyn LocalStorage) -> Vec<NotificationItem> {
    let raw = match storage.get(NOTIFICATION_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(error) => {
            warn!(error = %error, "failed to read persisted notifications, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<NotificationItem>>(&raw) {
        Ok(items) => items,
        Err(error) => {
            warn!(error = %error, "persisted notifications are malformed, starting empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests;
