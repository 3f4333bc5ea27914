use lantern_application::{RenderedNavLink, RoleInfo, RoleOverview};
use lantern_domain::PermissionEntry;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// API representation of one permission toggle.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-entry-response.ts"
)]
pub struct PermissionEntryResponse {
    pub name: String,
    pub description: String,
    pub enabled: bool,
}

impl From<&PermissionEntry> for PermissionEntryResponse {
    fn from(value: &PermissionEntry) -> Self {
        Self {
            name: value.permission().as_str().to_owned(),
            description: value.description().to_owned(),
            enabled: value.enabled(),
        }
    }
}

/// API representation of the session's role details.
///
/// When `available` is false only `message` is set.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-info-response.ts"
)]
pub struct RoleInfoResponse {
    pub available: bool,
    pub role: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub permissions: Vec<PermissionEntryResponse>,
    pub message: Option<String>,
}

impl From<RoleInfo> for RoleInfoResponse {
    fn from(value: RoleInfo) -> Self {
        match value {
            RoleInfo::Available {
                role,
                display_name,
                description,
                permissions,
            } => Self {
                available: true,
                role: Some(role.as_str().to_owned()),
                display_name: Some(display_name),
                description: Some(description),
                permissions: permissions.iter().map(PermissionEntryResponse::from).collect(),
                message: None,
            },
            RoleInfo::Unavailable { message } => Self {
                available: false,
                role: None,
                display_name: None,
                description: None,
                permissions: Vec::new(),
                message: Some(message.to_owned()),
            },
        }
    }
}

/// API representation of the authenticated user.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/user-identity-response.ts"
)]
pub struct UserIdentityResponse {
    pub subject: String,
    pub display_name: String,
    pub role_claim: String,
    pub role_info: RoleInfoResponse,
    /// Features the user may open (e.g. `['cases', 'reports']`).
    pub accessible_features: Vec<String>,
}

/// API representation of a catalog role relative to the current user.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-overview-response.ts"
)]
pub struct RoleOverviewResponse {
    pub role: String,
    pub display_name: String,
    pub description: String,
    pub enabled_permission_count: u32,
    pub is_current: bool,
    pub is_higher_privilege: bool,
}

impl From<RoleOverview> for RoleOverviewResponse {
    fn from(value: RoleOverview) -> Self {
        Self {
            role: value.role.as_str().to_owned(),
            display_name: value.display_name,
            description: value.description,
            enabled_permission_count: u32::try_from(value.enabled_permission_count)
                .unwrap_or(u32::MAX),
            is_current: value.is_current,
            is_higher_privilege: value.is_higher_privilege,
        }
    }
}

/// Result of a single permission or feature check.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/access-check-response.ts"
)]
pub struct AccessCheckResponse {
    pub name: String,
    pub allowed: bool,
}

/// Query options for the gated navigation listing.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/navigation-query.ts"
)]
pub struct NavigationQuery {
    /// `hide` (default) or `disable`.
    pub mode: Option<String>,
}

/// API representation of a gated navigation link.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/nav-link-response.ts"
)]
pub struct NavLinkResponse {
    pub label: String,
    pub href: Option<String>,
    pub disabled: bool,
    pub tooltip: Option<String>,
}

impl From<RenderedNavLink> for NavLinkResponse {
    fn from(value: RenderedNavLink) -> Self {
        Self {
            label: value.label,
            href: value.href,
            disabled: value.disabled,
            tooltip: value.tooltip,
        }
    }
}
