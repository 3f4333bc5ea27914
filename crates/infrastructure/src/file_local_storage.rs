//! File-backed local storage. Each profile owns one JSON document mapping
//! keys to string values, standing in for a browser profile's local storage.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use lantern_application::LocalStorage;
use lantern_core::{AppError, AppResult};
use tracing::warn;

/// Local storage adapter persisting one profile's document on disk.
#[derive(Debug)]
pub struct FileLocalStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileLocalStorage {
    /// Opens storage for `profile` under `root`, creating `root` if needed.
    ///
    /// The profile name is hex-encoded into the file name, so any subject
    /// string maps to a safe path.
    pub fn for_profile(root: impl AsRef<Path>, profile: &str) -> AppResult<Self> {
        let root = root.as_ref();
        fs::create_dir_all(root).map_err(|error| {
            AppError::Internal(format!(
                "failed to create storage directory '{}': {error}",
                root.display()
            ))
        })?;

        Ok(Self {
            path: root.join(format!("{}.json", hex::encode(profile))),
            write_lock: Mutex::new(()),
        })
    }

    /// Returns the document path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    fn read_document(&self) -> AppResult<BTreeMap<String, String>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(error) => {
                return Err(AppError::Internal(format!(
                    "failed to read '{}': {error}",
                    self.path.display()
                )));
            }
        };

        serde_json::from_str(&raw).map_err(|error| {
            AppError::Internal(format!(
                "storage document '{}' is malformed: {error}",
                self.path.display()
            ))
        })
    }

    fn write_document(&self, document: &BTreeMap<String, String>) -> AppResult<()> {
        let encoded = serde_json::to_string(document).map_err(|error| {
            AppError::Internal(format!("failed to encode storage document: {error}"))
        })?;

        let staging_path = self.path.with_extension("json.tmp");
        fs::write(&staging_path, encoded).map_err(|error| {
            AppError::Internal(format!(
                "failed to write '{}': {error}",
                staging_path.display()
            ))
        })?;
        fs::rename(&staging_path, &self.path).map_err(|error| {
            AppError::Internal(format!(
                "failed to replace '{}': {error}",
                self.path.display()
            ))
        })
    }
}

impl LocalStorage for FileLocalStorage {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.read_document()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| AppError::Internal("local storage lock poisoned".to_owned()))?;

        let mut document = match self.read_document() {
            Ok(document) => document,
            Err(error) => {
                warn!(
                    path = %self.path.display(),
                    error = %error,
                    "replacing unreadable storage document"
                );
                BTreeMap::new()
            }
        };

        document.insert(key.to_owned(), value.to_owned());
        self.write_document(&document)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;

    use lantern_application::{
        DEFAULT_TOAST_DURATION, LocalStorage, NOTIFICATION_STORAGE_KEY, NotificationStore,
    };
    use lantern_domain::NotificationType;

    use super::FileLocalStorage;
    use crate::TracingToastSink;

    fn open(root: &std::path::Path, profile: &str) -> FileLocalStorage {
        let storage = FileLocalStorage::for_profile(root, profile);
        assert!(storage.is_ok());
        storage.unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn values_survive_reopening() {
        let directory = tempfile::tempdir();
        assert!(directory.is_ok());
        let directory = directory.unwrap_or_else(|_| unreachable!());

        let storage = open(directory.path(), "alice@example.org");
        assert!(storage.set("theme", "dark").is_ok());
        assert!(storage.set("density", "compact").is_ok());

        let reopened = open(directory.path(), "alice@example.org");
        assert_eq!(reopened.get("theme").ok().flatten().as_deref(), Some("dark"));
        assert_eq!(
            reopened.get("density").ok().flatten().as_deref(),
            Some("compact")
        );
    }

    #[test]
    fn profiles_do_not_share_documents() {
        let directory = tempfile::tempdir();
        assert!(directory.is_ok());
        let directory = directory.unwrap_or_else(|_| unreachable!());

        let alice = open(directory.path(), "alice");
        let bob = open(directory.path(), "../bob");
        assert!(alice.set("theme", "dark").is_ok());

        assert_eq!(bob.get("theme").ok(), Some(None));
        assert!(bob.path().starts_with(directory.path()));
    }

    #[test]
    fn corrupt_document_fails_reads_and_is_replaced_on_write() {
        let directory = tempfile::tempdir();
        assert!(directory.is_ok());
        let directory = directory.unwrap_or_else(|_| unreachable!());

        let storage = open(directory.path(), "carol");
        assert!(fs::write(storage.path(), "{not json").is_ok());
        assert!(storage.get("theme").is_err());

        assert!(storage.set("theme", "light").is_ok());
        assert_eq!(storage.get("theme").ok().flatten().as_deref(), Some("light"));
    }

    #[test]
    fn notification_store_recovers_from_corrupt_profile() {
        let directory = tempfile::tempdir();
        assert!(directory.is_ok());
        let directory = directory.unwrap_or_else(|_| unreachable!());

        let storage = Arc::new(open(directory.path(), "dana"));
        assert!(fs::write(storage.path(), "[[[").is_ok());

        let mut store = NotificationStore::load(
            storage.clone(),
            Arc::new(TracingToastSink::new()),
            DEFAULT_TOAST_DURATION,
        );
        assert!(store.notifications().is_empty());

        store.add_notification("Saved", "Your changes were saved", NotificationType::Success);
        let persisted = storage.get(NOTIFICATION_STORAGE_KEY).ok().flatten();
        assert!(persisted.is_some_and(|value| value.contains("\"type\":\"success\"")));
    }
}
