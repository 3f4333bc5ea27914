use std::collections::HashMap;
use std::sync::RwLock;

use lantern_application::LocalStorage;
use lantern_core::{AppError, AppResult};

/// In-memory local storage adapter. Contents live as long as the adapter.
#[derive(Debug, Default)]
pub struct InMemoryLocalStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryLocalStorage {
    /// Creates an empty in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStorage for InMemoryLocalStorage {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| AppError::Internal("local storage lock poisoned".to_owned()))?;

        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries
            .write()
            .map_err(|_| AppError::Internal("local storage lock poisoned".to_owned()))?
            .insert(key.to_owned(), value.to_owned());

        Ok(())
    }
}
