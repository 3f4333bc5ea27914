//! Role and permission checks for the current session.
//!
//! Every check is a pure lookup over the injected [`RoleCatalog`] and the
//! session's role claim. Unknown roles, unknown permission names, unknown
//! feature names, and roles without a definition all deny access.

use std::str::FromStr;
use std::sync::Arc;

use lantern_domain::{Feature, Permission, Role, RoleCatalog, RoleDefinition};
use tracing::warn;

mod overview;

pub use overview::{ROLE_INFO_UNAVAILABLE, RoleInfo, RoleOverview};

/// Requirement a gated element places on the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessRequirement {
    /// A single named permission.
    Permission(Permission),
    /// Any of the permissions a feature requires.
    Feature(Feature),
}

/// Access checks bound to one session's role.
#[derive(Debug, Clone)]
pub struct AccessGuard {
    catalog: Arc<RoleCatalog>,
    role: Option<Role>,
}

impl AccessGuard {
    /// Creates a guard for an already-parsed role, or for no role at all.
    #[must_use]
    pub fn new(catalog: Arc<RoleCatalog>, role: Option<Role>) -> Self {
        Self { catalog, role }
    }

    /// Creates a guard from the raw role claim stored in the session.
    #[must_use]
    pub fn for_role_claim(catalog: Arc<RoleCatalog>, role_claim: &str) -> Self {
        let role = match Role::from_str(role_claim) {
            Ok(role) => Some(role),
            Err(_) => {
                warn!(role_claim, "unrecognized role claim, denying all permissions");
                None
            }
        };

        Self::new(catalog, role)
    }

    /// Returns the active role, if the claim was recognized.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// Returns the definition for the active role.
    #[must_use]
    pub fn definition(&self) -> Option<&RoleDefinition> {
        self.role.and_then(|role| self.catalog.definition(role))
    }

    /// Returns whether the active role is one of `candidates`.
    ///
    /// An empty candidate list places no restriction.
    #[must_use]
    pub fn has_role(&self, candidates: &[Role]) -> bool {
        if candidates.is_empty() {
            return true;
        }

        self.role.is_some_and(|role| candidates.contains(&role))
    }

    /// Returns the `enabled` flag of the permission under the active role.
    #[must_use]
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.definition()
            .is_some_and(|definition| definition.grants(permission))
    }

    /// Same as [`Self::has_permission`] for a transport permission name.
    #[must_use]
    pub fn has_permission_named(&self, permission_name: &str) -> bool {
        Permission::from_str(permission_name).is_ok_and(|permission| self.has_permission(permission))
    }

    /// Returns whether any permission the feature requires is granted.
    #[must_use]
    pub fn can_access(&self, feature: Feature) -> bool {
        feature
            .required_permissions()
            .iter()
            .any(|permission| self.has_permission(*permission))
    }

    /// Same as [`Self::can_access`] for a transport feature name.
    #[must_use]
    pub fn can_access_named(&self, feature_name: &str) -> bool {
        Feature::from_str(feature_name).is_ok_and(|feature| self.can_access(feature))
    }

    /// Evaluates a gate requirement.
    #[must_use]
    pub fn satisfies(&self, requirement: AccessRequirement) -> bool {
        match requirement {
            AccessRequirement::Permission(permission) => self.has_permission(permission),
            AccessRequirement::Feature(feature) => self.can_access(feature),
        }
    }

    /// Returns the features the session may open, in declaration order.
    #[must_use]
    pub fn accessible_features(&self) -> Vec<Feature> {
        Feature::all()
            .iter()
            .copied()
            .filter(|feature| self.can_access(*feature))
            .collect()
    }

    /// Returns whether the active role strictly outranks `other`.
    #[must_use]
    pub fn outranks(&self, other: Role) -> bool {
        self.definition()
            .is_some_and(|definition| definition.role().outranks(other))
    }
}
