use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use lantern_application::{DEFAULT_TOAST_DURATION, ROLE_INFO_UNAVAILABLE};
use lantern_core::{AppError, UserIdentity};
use lantern_domain::RoleCatalog;
use lantern_infrastructure::TracingToastSink;
use tower_sessions::{MemoryStore, Session};

use super::bootstrap::BootstrapRequest;
use super::{SESSION_USER_KEY, bootstrap_handler, logout_handler, me_handler};
use crate::notification_sessions::{NotificationSessions, StorageBackend};
use crate::state::AppState;

fn test_state() -> AppState {
    AppState {
        role_catalog: Arc::new(RoleCatalog::builtin()),
        notifications: NotificationSessions::new(
            StorageBackend::Memory,
            Arc::new(TracingToastSink::new()),
            DEFAULT_TOAST_DURATION,
        ),
        frontend_url: "http://localhost:3000".to_owned(),
        bootstrap_token: "bootstrap".to_owned(),
    }
}

fn new_session() -> Session {
    Session::new(None, Arc::new(MemoryStore::default()), None)
}

fn request(subject: &str, role: &str, token: &str) -> BootstrapRequest {
    BootstrapRequest {
        subject: subject.to_owned(),
        display_name: None,
        role: role.to_owned(),
        token: token.to_owned(),
    }
}

async fn is_mounted(state: &AppState, subject: &str) -> bool {
    state
        .notifications
        .with_store(subject, |store| store.unread_count())
        .await
        .is_ok()
}

#[tokio::test]
async fn wrong_token_is_unauthorized_and_mounts_nothing() {
    let state = test_state();

    let result = bootstrap_handler(
        State(state.clone()),
        new_session(),
        Json(request("alice", "viewer", "guess")),
    )
    .await;

    let Err(error) = result else {
        unreachable!("bootstrap with a wrong token should fail");
    };
    assert_eq!(error.into_response().status(), StatusCode::UNAUTHORIZED);
    assert!(!is_mounted(&state, "alice").await);
}

#[tokio::test]
async fn blank_subject_is_rejected() {
    let state = test_state();

    let result = bootstrap_handler(
        State(state.clone()),
        new_session(),
        Json(request("   ", "viewer", "bootstrap")),
    )
    .await;

    assert!(matches!(result, Err(ref error) if matches!(error.0, AppError::Validation(_))));
    assert!(!is_mounted(&state, "").await);
}

#[tokio::test]
async fn bootstrap_stores_identity_and_mounts_notifications() {
    let state = test_state();
    let session = new_session();

    let result = bootstrap_handler(
        State(state.clone()),
        session.clone(),
        Json(request("alice", "case-worker", "bootstrap")),
    )
    .await;
    assert_eq!(result.ok(), Some(StatusCode::NO_CONTENT));

    let identity = session.get::<UserIdentity>(SESSION_USER_KEY).await;
    let identity = identity.ok().flatten();
    assert_eq!(identity.as_ref().map(UserIdentity::subject), Some("alice"));
    assert_eq!(identity.as_ref().map(UserIdentity::display_name), Some("alice"));
    assert_eq!(identity.as_ref().map(UserIdentity::role), Some("case-worker"));
    assert!(is_mounted(&state, "alice").await);
}

#[tokio::test]
async fn logout_unmounts_notifications() {
    let state = test_state();
    let session = new_session();

    let result = bootstrap_handler(
        State(state.clone()),
        session.clone(),
        Json(request("alice", "viewer", "bootstrap")),
    )
    .await;
    assert!(result.is_ok());

    let result = logout_handler(State(state.clone()), session).await;
    assert_eq!(result.ok(), Some(StatusCode::NO_CONTENT));
    assert!(!is_mounted(&state, "alice").await);
}

#[tokio::test]
async fn logout_keeps_notifications_for_other_sessions() {
    let state = test_state();
    let laptop = new_session();
    let phone = new_session();

    for session in [laptop.clone(), phone] {
        let result = bootstrap_handler(
            State(state.clone()),
            session,
            Json(request("alice", "viewer", "bootstrap")),
        )
        .await;
        assert!(result.is_ok());
    }

    let result = logout_handler(State(state.clone()), laptop).await;
    assert!(result.is_ok());
    assert!(is_mounted(&state, "alice").await);
}

#[tokio::test]
async fn me_reports_missing_role_information_for_unknown_claims() {
    let user = UserIdentity::new("alice", "Alice", "superuser");

    let result = me_handler(State(test_state()), Extension(user)).await;
    let Ok(Json(me)) = result else {
        unreachable!("me should succeed");
    };

    assert_eq!(me.role_claim, "superuser");
    assert!(!me.role_info.available);
    assert_eq!(me.role_info.message.as_deref(), Some(ROLE_INFO_UNAVAILABLE));
    assert!(me.role_info.permissions.is_empty());
    assert!(me.accessible_features.is_empty());
}

#[tokio::test]
async fn me_lists_role_details_and_features() {
    let user = UserIdentity::new("vic", "Vic", "viewer");

    let result = me_handler(State(test_state()), Extension(user)).await;
    let Ok(Json(me)) = result else {
        unreachable!("me should succeed");
    };

    assert!(me.role_info.available);
    assert_eq!(me.role_info.display_name.as_deref(), Some("Viewer"));
    assert_eq!(me.accessible_features, vec!["reports".to_owned()]);
}
