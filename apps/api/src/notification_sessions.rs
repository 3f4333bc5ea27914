use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use lantern_application::{LocalStorage, NotificationProvider, NotificationStore, ToastSink};
use lantern_core::AppResult;
use lantern_infrastructure::{FileLocalStorage, InMemoryLocalStorage};
use tokio::sync::Mutex;
use tracing::info;

/// Where per-subject notification lists are persisted.
#[derive(Debug, Clone)]
pub enum StorageBackend {
    /// Process memory; lists survive logout but not restarts.
    Memory,
    /// One JSON document per subject under `root`.
    File { root: PathBuf },
}

struct MountedProvider {
    provider: NotificationProvider,
    sessions: usize,
}

#[derive(Default)]
struct SessionsInner {
    providers: HashMap<String, MountedProvider>,
    memory_profiles: HashMap<String, Arc<InMemoryLocalStorage>>,
}

/// Notification providers for every signed-in subject.
#[derive(Clone)]
pub struct NotificationSessions {
    inner: Arc<Mutex<SessionsInner>>,
    backend: StorageBackend,
    toasts: Arc<dyn ToastSink>,
    toast_duration: Duration,
}

impl NotificationSessions {
    pub fn new(
        backend: StorageBackend,
        toasts: Arc<dyn ToastSink>,
        toast_duration: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SessionsInner::default())),
            backend,
            toasts,
            toast_duration,
        }
    }

    /// Mounts the subject's store for one more session.
    ///
    /// The store is loaded on the first mount and shared by every later
    /// session of the same subject.
    pub async fn mount(&self, subject: &str) -> AppResult<()> {
        let mut inner = self.inner.lock().await;
        if let Some(mounted) = inner.providers.get_mut(subject) {
            mounted.sessions += 1;
            info!(subject, sessions = mounted.sessions, "joined notification store");
            return Ok(());
        }

        let storage = self.open_storage(&mut inner, subject)?;
        let store = NotificationStore::load(storage, self.toasts.clone(), self.toast_duration);
        let loaded = store.notifications().len();
        inner.providers.insert(
            subject.to_owned(),
            MountedProvider {
                provider: NotificationProvider::mounted(store),
                sessions: 1,
            },
        );

        info!(subject, loaded, "mounted notification store");
        Ok(())
    }

    /// Releases one session's hold on the subject's store.
    ///
    /// The in-memory store is dropped once its last session ends. Persisted
    /// data is kept.
    pub async fn unmount(&self, subject: &str) {
        let mut inner = self.inner.lock().await;
        let Some(mounted) = inner.providers.get_mut(subject) else {
            return;
        };

        mounted.sessions = mounted.sessions.saturating_sub(1);
        if mounted.sessions > 0 {
            info!(subject, sessions = mounted.sessions, "left notification store");
            return;
        }

        inner.providers.remove(subject);
        info!(subject, "unmounted notification store");
    }

    /// Runs `operation` against the subject's mounted store.
    pub async fn with_store<R>(
        &self,
        subject: &str,
        operation: impl FnOnce(&mut NotificationStore) -> R,
    ) -> AppResult<R> {
        let mut inner = self.inner.lock().await;
        let mut detached = NotificationProvider::new();
        let provider = inner
            .providers
            .get_mut(subject)
            .map_or(&mut detached, |mounted| &mut mounted.provider);

        Ok(operation(provider.store_mut()?))
    }

    fn open_storage(
        &self,
        inner: &mut SessionsInner,
        subject: &str,
    ) -> AppResult<Arc<dyn LocalStorage>> {
        match &self.backend {
            StorageBackend::Memory => {
                let storage = inner
                    .memory_profiles
                    .entry(subject.to_owned())
                    .or_insert_with(|| Arc::new(InMemoryLocalStorage::new()))
                    .clone();
                Ok(storage)
            }
            StorageBackend::File { root } => {
                Ok(Arc::new(FileLocalStorage::for_profile(root, subject)?))
            }
        }
    }
}
