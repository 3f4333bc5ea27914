use lantern_core::{AppError, AppResult};
use tracing::error;

use crate::notification_store::NotificationStore;

/// Session-scoped owner of a [`NotificationStore`].
///
/// A store is only reachable after it has been mounted for the session.
/// Reaching for it earlier is a wiring defect, reported as an internal error.
#[derive(Default)]
pub struct NotificationProvider {
    store: Option<NotificationStore>,
}

impl NotificationProvider {
    /// Creates a provider with no store mounted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider with `store` already mounted.
    #[must_use]
    pub fn mounted(store: NotificationStore) -> Self {
        Self { store: Some(store) }
    }

    /// Mounts `store`, replacing any store mounted before.
    pub fn mount(&mut self, store: NotificationStore) {
        self.store = Some(store);
    }

    /// Detaches and returns the mounted store.
    pub fn unmount(&mut self) -> Option<NotificationStore> {
        self.store.take()
    }

    /// Returns whether a store is mounted.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.store.is_some()
    }

    /// Returns the mounted store.
    pub fn store(&self) -> AppResult<&NotificationStore> {
        self.store.as_ref().ok_or_else(outside_provider)
    }

    /// Returns the mounted store for mutation.
    pub fn store_mut(&mut self) -> AppResult<&mut NotificationStore> {
        self.store.as_mut().ok_or_else(outside_provider)
    }
}

fn outside_provider() -> AppError {
    error!("notification store used outside of its provider");
    AppError::Internal("notification store used outside of its provider".to_owned())
}
