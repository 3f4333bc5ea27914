use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use lantern_core::{AppError, AppResult};
use lantern_domain::{NotificationId, NotificationItem, NotificationType};

use crate::notification_ports::{LocalStorage, Toast, ToastSink};

use super::{DEFAULT_TOAST_DURATION, NOTIFICATION_STORAGE_KEY, NotificationStore};

#[derive(Default)]
struct FakeLocalStorage {
    values: Mutex<HashMap<String, String>>,
    fail_writes: bool,
    fail_reads: bool,
}

impl FakeLocalStorage {
    fn with_value(key: &str, value: &str) -> Self {
        Self {
            values: Mutex::new(HashMap::from([(key.to_owned(), value.to_owned())])),
            ..Self::default()
        }
    }

    fn stored(&self) -> Option<String> {
        self.values
            .lock()
            .ok()
            .and_then(|values| values.get(NOTIFICATION_STORAGE_KEY).cloned())
    }
}

impl LocalStorage for FakeLocalStorage {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        if self.fail_reads {
            return Err(AppError::Internal("storage unavailable".to_owned()));
        }

        Ok(self
            .values
            .lock()
            .ok()
            .and_then(|values| values.get(key).cloned()))
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        if self.fail_writes {
            return Err(AppError::Internal("quota exceeded".to_owned()));
        }

        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_owned(), value.to_owned());
        }
        Ok(())
    }
}

#[derive(Default)]
struct RecordingToastSink {
    toasts: Mutex<Vec<Toast>>,
}

impl RecordingToastSink {
    fn shown(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .map(|toasts| toasts.clone())
            .unwrap_or_default()
    }
}

impl ToastSink for RecordingToastSink {
    fn show(&self, toast: &Toast) {
        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.push(toast.clone());
        }
    }
}

fn store_with(storage: Arc<FakeLocalStorage>) -> (NotificationStore, Arc<RecordingToastSink>) {
    let toasts = Arc::new(RecordingToastSink::default());
    let store = NotificationStore::load(storage, toasts.clone(), DEFAULT_TOAST_DURATION);
    (store, toasts)
}

#[test]
fn add_then_mark_read_clears_unread_and_toasts_once() {
    let (mut store, toasts) = store_with(Arc::new(FakeLocalStorage::default()));

    let id = store.add_notification(
        "Saved",
        "Your changes were saved",
        NotificationType::Success,
    );
    assert_eq!(store.unread_count(), 1);

    store.mark_as_read(&id);
    assert_eq!(store.unread_count(), 0);
    assert!(store.notifications()[0].is_read());

    let shown = toasts.shown();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].kind, NotificationType::Success);
    assert_eq!(shown[0].title, "Saved");
    assert_eq!(shown[0].duration, DEFAULT_TOAST_DURATION);
}

#[test]
fn additions_are_prepended_with_unique_ids() {
    let (mut store, _toasts) = store_with(Arc::new(FakeLocalStorage::default()));
    store.add_notification("Existing", "Already here", NotificationType::Info);

    let mut last_id = None;
    for index in 0..25 {
        last_id = Some(store.add_notification(
            format!("Donation {index}"),
            "A new donation arrived",
            NotificationType::Info,
        ));
    }

    assert_eq!(store.notifications().len(), 26);
    assert_eq!(Some(store.notifications()[0].id()), last_id.as_ref());
    assert_eq!(store.notifications()[0].title(), "Donation 24");

    let ids: HashSet<&str> = store
        .notifications()
        .iter()
        .map(|item| item.id().as_str())
        .collect();
    assert_eq!(ids.len(), 26);
}

#[test]
fn mark_all_as_read_always_zeroes_unread_count() {
    let (mut store, _toasts) = store_with(Arc::new(FakeLocalStorage::default()));
    store.mark_all_as_read();
    assert_eq!(store.unread_count(), 0);

    for _ in 0..12 {
        store.add_notification("Case updated", "Notes were added", NotificationType::Info);
    }
    assert_eq!(store.badge_label().as_deref(), Some("9+"));

    store.mark_all_as_read();
    assert_eq!(store.unread_count(), 0);
    assert_eq!(store.badge_label(), None);
}

#[test]
fn absent_ids_are_ignored() {
    let (mut store, _toasts) = store_with(Arc::new(FakeLocalStorage::default()));
    store.add_notification("Heads up", "Check the schedule", NotificationType::Warning);
    let missing = NotificationId::from_string("0-missing00");

    store.mark_as_read(&missing);
    store.remove_notification(&missing);

    assert_eq!(store.notifications().len(), 1);
    assert_eq!(store.unread_count(), 1);
}

#[test]
fn remove_and_clear_update_persisted_list() {
    let storage = Arc::new(FakeLocalStorage::default());
    let (mut store, _toasts) = store_with(storage.clone());

    let first = store.add_notification("First", "one", NotificationType::Info);
    store.add_notification("Second", "two", NotificationType::Error);
    store.remove_notification(&first);

    let persisted = storage.stored().unwrap_or_default();
    let decoded = serde_json::from_str::<Vec<NotificationItem>>(&persisted).unwrap_or_default();
    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded[0].title(), "Second");

    store.clear_all();
    assert!(store.notifications().is_empty());
    assert_eq!(storage.stored().as_deref(), Some("[]"));
}

#[test]
fn reload_reproduces_persisted_items() {
    let storage = Arc::new(FakeLocalStorage::default());
    let (mut store, _toasts) = store_with(storage.clone());
    let read_id = store.add_notification(
        "Saved",
        "Your changes were saved",
        NotificationType::Success,
    );
    store.add_notification("Failed", "Upload failed", NotificationType::Error);
    store.mark_as_read(&read_id);
    let original = store.notifications().to_vec();

    let (reloaded, _toasts) = store_with(storage);

    assert_eq!(reloaded.notifications().len(), original.len());
    for (restored, item) in reloaded.notifications().iter().zip(&original) {
        assert_eq!(restored.id(), item.id());
        assert_eq!(restored.title(), item.title());
        assert_eq!(restored.description(), item.description());
        assert_eq!(restored.kind(), item.kind());
        assert_eq!(restored.is_read(), item.is_read());
        assert_eq!(restored.timestamp(), item.timestamp());
    }
}

#[test]
fn malformed_persisted_json_starts_empty() {
    let storage = Arc::new(FakeLocalStorage::with_value(
        NOTIFICATION_STORAGE_KEY,
        "[{\"id\": \"1-abc\", \"title\": ",
    ));
    let (store, toasts) = store_with(storage);

    assert!(store.notifications().is_empty());
    assert!(toasts.shown().is_empty());
}

#[test]
fn unparseable_timestamp_starts_empty() {
    let storage = Arc::new(FakeLocalStorage::with_value(
        NOTIFICATION_STORAGE_KEY,
        r#"[{"id":"1-abc","title":"T","description":"D","type":"info","read":false,"timestamp":"yesterday"}]"#,
    ));
    let (store, _toasts) = store_with(storage);

    assert!(store.notifications().is_empty());
}

#[test]
fn storage_read_failure_starts_empty() {
    let storage = Arc::new(FakeLocalStorage {
        fail_reads: true,
        ..FakeLocalStorage::default()
    });
    let (store, _toasts) = store_with(storage);

    assert!(store.notifications().is_empty());
}

#[test]
fn storage_write_failure_keeps_in_memory_state() {
    let storage = Arc::new(FakeLocalStorage {
        fail_writes: true,
        ..FakeLocalStorage::default()
    });
    let (mut store, toasts) = store_with(storage.clone());

    store.add_notification("Offline", "Could not reach storage", NotificationType::Warning);

    assert_eq!(store.notifications().len(), 1);
    assert_eq!(toasts.shown().len(), 1);
    assert_eq!(storage.stored(), None);
}
