use lantern_domain::{PermissionEntry, Role};

use super::AccessGuard;

/// Message shown when the session's role has no definition.
pub const ROLE_INFO_UNAVAILABLE: &str = "Role information not available";

/// Role details for the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleInfo {
    /// The active role has a definition.
    Available {
        /// Active role.
        role: Role,
        /// Display name.
        display_name: String,
        /// Role description.
        description: String,
        /// Permission entries, enabled and disabled.
        permissions: Vec<PermissionEntry>,
    },
    /// The role claim was unknown or has no definition.
    Unavailable {
        /// User-facing explanation.
        message: &'static str,
    },
}

/// One catalog role described relative to the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleOverview {
    /// Catalog role.
    pub role: Role,
    /// Display name.
    pub display_name: String,
    /// Role description.
    pub description: String,
    /// Number of enabled permissions.
    pub enabled_permission_count: usize,
    /// Whether this is the session's role.
    pub is_current: bool,
    /// Whether this role ranks above the session's role.
    pub is_higher_privilege: bool,
}

impl AccessGuard {
    /// Describes the active role, or explains why it cannot.
    #[must_use]
    pub fn role_info(&self) -> RoleInfo {
        match self.definition() {
            Some(definition) => RoleInfo::Available {
                role: definition.role(),
                display_name: definition.display_name().to_owned(),
                description: definition.description().to_owned(),
                permissions: definition.permissions().to_vec(),
            },
            None => RoleInfo::Unavailable {
                message: ROLE_INFO_UNAVAILABLE,
            },
        }
    }

    /// Lists every catalog role with its standing relative to the session.
    ///
    /// Ranking uses the explicit role hierarchy. Without a usable role every
    /// entry is reported as higher privilege.
    #[must_use]
    pub fn role_overview(&self) -> Vec<RoleOverview> {
        let current = self.definition().map(|definition| definition.role());

        self.catalog
            .definitions()
            .iter()
            .map(|definition| RoleOverview {
                role: definition.role(),
                display_name: definition.display_name().to_owned(),
                description: definition.description().to_owned(),
                enabled_permission_count: definition.enabled_permissions().len(),
                is_current: current == Some(definition.role()),
                is_higher_privilege: current
                    .is_none_or(|current| definition.role().outranks(current)),
            })
            .collect()
    }
}
