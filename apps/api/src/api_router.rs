use axum::Router;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{delete, get, post};
use lantern_core::AppError;
use tower_http::trace::TraceLayer;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::state::AppState;
use crate::{auth, handlers, middleware};

mod cors;

use cors::build_cors_layer;

pub fn build_router(
    app_state: AppState,
    frontend_url: &str,
    session_layer: SessionManagerLayer<MemoryStore>,
) -> Result<Router, AppError> {
    let protected_routes = Router::new()
        .route("/auth/me", get(auth::me_handler))
        .route(
            "/api/access/roles",
            get(handlers::access::list_roles_handler),
        )
        .route(
            "/api/access/permissions/{permission}",
            get(handlers::access::check_permission_handler),
        )
        .route(
            "/api/access/features/{feature}",
            get(handlers::access::check_feature_handler),
        )
        .route(
            "/api/access/navigation",
            get(handlers::access::navigation_handler),
        )
        .route(
            "/api/notifications",
            get(handlers::notifications::list_notifications_handler)
                .post(handlers::notifications::create_notification_handler)
                .delete(handlers::notifications::clear_notifications_handler),
        )
        .route(
            "/api/notifications/read-all",
            post(handlers::notifications::mark_all_notifications_read_handler),
        )
        .route(
            "/api/notifications/{notification_id}/read",
            post(handlers::notifications::mark_notification_read_handler),
        )
        .route(
            "/api/notifications/{notification_id}",
            delete(handlers::notifications::remove_notification_handler),
        )
        .route_layer(from_fn(middleware::require_auth));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/auth/bootstrap", post(auth::bootstrap_handler))
        .route("/auth/logout", post(auth::logout_handler))
        .merge(protected_routes)
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_same_origin_for_mutations,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(frontend_url)?)
        .layer(session_layer)
        .with_state(app_state))
}
