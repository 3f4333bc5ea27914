use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use lantern_application::{GateMode, NavLinkGate, dashboard_navigation};
use lantern_core::{AppError, UserIdentity};

use crate::dto::{AccessCheckResponse, NavLinkResponse, NavigationQuery, RoleOverviewResponse};
use crate::error::ApiResult;
use crate::state::AppState;


pub async fn list_roles_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<RoleOverviewResponse>>> {
    let roles = state
        .access_guard(&user)
        .role_overview()
        .into_iter()
        .map(RoleOverviewResponse::from)
        .collect();

    Ok(Json(roles))
}

pub async fn check_permission_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(permission): Path<String>,
) -> ApiResult<Json<AccessCheckResponse>> {
    let allowed = state.access_guard(&user).has_permission_named(&permission);

    Ok(Json(AccessCheckResponse {
        name: permission,
        allowed,
    }))
}

pub async fn check_feature_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(feature): Path<String>,
) -> ApiResult<Json<AccessCheckResponse>> {
    let allowed = state.access_guard(&user).can_access_named(&feature);

    Ok(Json(AccessCheckResponse {
        name: feature,
        allowed,
    }))
}

pub async fn navigation_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<NavigationQuery>,
) -> ApiResult<Json<Vec<NavLinkResponse>>> {
    let gate = NavLinkGate::new(parse_gate_mode(query.mode.as_deref())?);
    let links = gate
        .apply_all(&state.access_guard(&user), &dashboard_navigation())
        .into_iter()
        .map(NavLinkResponse::from)
        .collect();

    Ok(Json(links))
}

fn parse_gate_mode(value: Option<&str>) -> Result<GateMode, AppError> {
    match value.map(str::trim) {
        None | Some("") | Some("hide") => Ok(GateMode::Hide),
        Some("disable") => Ok(GateMode::Disable),
        Some(other) => Err(AppError::Validation(format!(
            "navigation mode must be either 'hide' or 'disable', got '{other}'"
        ))),
    }
}
