use std::sync::Arc;

use lantern_application::AccessGuard;
use lantern_core::UserIdentity;
use lantern_domain::RoleCatalog;

use crate::notification_sessions::NotificationSessions;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub role_catalog: Arc<RoleCatalog>,
    pub notifications: NotificationSessions,
    pub frontend_url: String,
    pub bootstrap_token: String,
}

impl AppState {
    /// Builds the access guard for an authenticated identity.
    pub fn access_guard(&self, identity: &UserIdentity) -> AccessGuard {
        AccessGuard::for_role_claim(self.role_catalog.clone(), identity.role())
    }
}
