use serde::Serialize;
use ts_rs::TS;

mod access;
mod notifications;

pub use access::{
    AccessCheckResponse, NavLinkResponse, NavigationQuery, PermissionEntryResponse,
    RoleInfoResponse, RoleOverviewResponse, UserIdentityResponse,
};
pub use notifications::{
    CreateNotificationRequest, CreateNotificationResponse, NotificationListResponse,
    NotificationResponse,
};

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}
