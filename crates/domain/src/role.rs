use std::collections::HashSet;

use lantern_core::{AppError, AppResult};

use crate::security::{Feature, Permission, Role};

/// One permission toggle inside a role definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionEntry {
    permission: Permission,
    enabled: bool,
    description: String,
}

impl PermissionEntry {
    /// Creates a permission entry with an explicit description.
    #[must_use]
    pub fn new(permission: Permission, enabled: bool, description: impl Into<String>) -> Self {
        Self {
            permission,
            enabled,
            description: description.into(),
        }
    }

    /// Creates an enabled entry carrying the permission's default description.
    #[must_use]
    pub fn granted(permission: Permission) -> Self {
        Self::new(permission, true, permission.description())
    }

    /// Creates a disabled entry carrying the permission's default description.
    #[must_use]
    pub fn withheld(permission: Permission) -> Self {
        Self::new(permission, false, permission.description())
    }

    /// Returns the permission this entry toggles.
    #[must_use]
    pub fn permission(&self) -> Permission {
        self.permission
    }

    /// Returns whether the permission is granted.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }
}

/// Display metadata and permission list for one role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleDefinition {
    role: Role,
    display_name: String,
    description: String,
    permissions: Vec<PermissionEntry>,
}

impl RoleDefinition {
    /// Creates a role definition.
    ///
    /// Each permission may be listed at most once.
    pub fn new(
        role: Role,
        display_name: impl Into<String>,
        description: impl Into<String>,
        permissions: Vec<PermissionEntry>,
    ) -> AppResult<Self> {
        let mut seen = HashSet::new();
        for entry in &permissions {
            if !seen.insert(entry.permission) {
                return Err(AppError::Validation(format!(
                    "role '{}' lists permission '{}' more than once",
                    role.as_str(),
                    entry.permission.as_str()
                )));
            }
        }

        Ok(Self {
            role,
            display_name: display_name.into(),
            description: description.into(),
            permissions,
        })
    }

    /// Returns the role described by this definition.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the role description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Returns the ordered permission entries.
    #[must_use]
    pub fn permissions(&self) -> &[PermissionEntry] {
        &self.permissions
    }

    /// Returns the entry for a permission, if this role lists it.
    #[must_use]
    pub fn entry(&self, permission: Permission) -> Option<&PermissionEntry> {
        self.permissions
            .iter()
            .find(|entry| entry.permission == permission)
    }

    /// Returns whether the permission is listed and enabled.
    #[must_use]
    pub fn grants(&self, permission: Permission) -> bool {
        self.entry(permission).is_some_and(PermissionEntry::enabled)
    }

    /// Returns the enabled permissions in declaration order.
    #[must_use]
    pub fn enabled_permissions(&self) -> Vec<Permission> {
        self.permissions
            .iter()
            .filter(|entry| entry.enabled)
            .map(|entry| entry.permission)
            .collect()
    }
}

/// Read-only table of role definitions consulted by access checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleCatalog {
    definitions: Vec<RoleDefinition>,
}

impl RoleCatalog {
    /// Creates a catalog, rejecting roles defined more than once.
    pub fn new(definitions: Vec<RoleDefinition>) -> AppResult<Self> {
        let mut seen = HashSet::new();
        for definition in &definitions {
            if !seen.insert(definition.role) {
                return Err(AppError::Validation(format!(
                    "role '{}' is defined more than once",
                    definition.role.as_str()
                )));
            }
        }

        Ok(Self { definitions })
    }

    /// Returns the role table shipped with the dashboard.
    #[must_use]
    pub fn builtin() -> Self {
        use Permission::{
            AccessReports, AssignCases, EditCases, ExportData, ManageDonations, ManageSettings,
            ManageUsers, ViewAllCases, ViewAssignedCases,
        };

        let definitions = vec![
            RoleDefinition {
                role: Role::Admin,
                display_name: "Administrator".to_owned(),
                description: "Full access to staff accounts, settings, cases, donations, and reports"
                    .to_owned(),
                permissions: Permission::all()
                    .iter()
                    .copied()
                    .map(PermissionEntry::granted)
                    .collect(),
            },
            RoleDefinition {
                role: Role::Manager,
                display_name: "Program Manager".to_owned(),
                description: "Oversees case work, assigns cases, and tracks donations".to_owned(),
                permissions: vec![
                    PermissionEntry::withheld(ManageUsers),
                    PermissionEntry::withheld(ManageSettings),
                    PermissionEntry::granted(ViewAllCases),
                    PermissionEntry::granted(ViewAssignedCases),
                    PermissionEntry::granted(AssignCases),
                    PermissionEntry::granted(EditCases),
                    PermissionEntry::granted(ManageDonations),
                    PermissionEntry::granted(AccessReports),
                    PermissionEntry::granted(ExportData),
                ],
            },
            RoleDefinition {
                role: Role::CaseWorker,
                display_name: "Case Worker".to_owned(),
                description: "Works assigned cases and keeps case notes current".to_owned(),
                permissions: vec![
                    PermissionEntry::withheld(ViewAllCases),
                    PermissionEntry::granted(ViewAssignedCases),
                    PermissionEntry::withheld(AssignCases),
                    PermissionEntry::granted(EditCases),
                    PermissionEntry::withheld(AccessReports),
                ],
            },
            RoleDefinition {
                role: Role::Viewer,
                display_name: "Viewer".to_owned(),
                description: "Read-only access to reports".to_owned(),
                permissions: vec![PermissionEntry::granted(AccessReports)],
            },
        ];

        Self { definitions }
    }

    /// Returns every definition in declaration order.
    #[must_use]
    pub fn definitions(&self) -> &[RoleDefinition] {
        &self.definitions
    }

    /// Returns the definition for a role, if one exists.
    #[must_use]
    pub fn definition(&self, role: Role) -> Option<&RoleDefinition> {
        self.definitions
            .iter()
            .find(|definition| definition.role == role)
    }

    /// Returns the definition of the most privileged role in the catalog.
    #[must_use]
    pub fn highest_privilege(&self) -> Option<&RoleDefinition> {
        self.definitions
            .iter()
            .max_by_key(|definition| definition.role.rank())
    }

    /// Checks that every feature only depends on permissions the most
    /// privileged role lists.
    pub fn validate_features(&self) -> AppResult<()> {
        let highest = self.highest_privilege().ok_or_else(|| {
            AppError::Validation("role catalog must define at least one role".to_owned())
        })?;

        for feature in Feature::all() {
            for permission in feature.required_permissions() {
                if highest.entry(*permission).is_none() {
                    return Err(AppError::Validation(format!(
                        "feature '{}' requires permission '{}' which role '{}' does not list",
                        feature.as_str(),
                        permission.as_str(),
                        highest.role.as_str()
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{PermissionEntry, RoleCatalog, RoleDefinition};
    use crate::security::{Permission, Role};

    #[test]
    fn builtin_catalog_defines_every_role_once() {
        let catalog = RoleCatalog::builtin();
        for role in Role::all() {
            assert!(catalog.definition(*role).is_some());
        }

        let revalidated = RoleCatalog::new(catalog.definitions().to_vec());
        assert!(revalidated.is_ok());
    }

    #[test]
    fn builtin_catalog_passes_feature_validation() {
        assert!(RoleCatalog::builtin().validate_features().is_ok());
    }

    #[test]
    fn viewer_only_grants_reports() {
        let catalog = RoleCatalog::builtin();
        let viewer = catalog.definition(Role::Viewer);
        assert!(viewer.is_some());

        let viewer = viewer.unwrap_or_else(|| unreachable!());
        assert_eq!(viewer.enabled_permissions(), vec![Permission::AccessReports]);
        assert!(!viewer.grants(Permission::ManageUsers));
    }

    #[test]
    fn listed_but_disabled_permission_is_not_granted() {
        let catalog = RoleCatalog::builtin();
        let manager = catalog.definition(Role::Manager);
        assert!(manager.is_some());

        let manager = manager.unwrap_or_else(|| unreachable!());
        assert!(manager.entry(Permission::ManageUsers).is_some());
        assert!(!manager.grants(Permission::ManageUsers));
    }

    #[test]
    fn duplicate_roles_are_rejected() {
        let definition = RoleDefinition::new(Role::Viewer, "Viewer", "Read-only", Vec::new());
        assert!(definition.is_ok());
        let definition = definition.unwrap_or_else(|_| unreachable!());

        let catalog = RoleCatalog::new(vec![definition.clone(), definition]);
        assert!(catalog.is_err());
    }

    #[test]
    fn duplicate_permission_entries_are_rejected() {
        let definition = RoleDefinition::new(
            Role::Viewer,
            "Viewer",
            "Read-only",
            vec![
                PermissionEntry::granted(Permission::AccessReports),
                PermissionEntry::withheld(Permission::AccessReports),
            ],
        );
        assert!(definition.is_err());
    }

    #[test]
    fn feature_validation_catches_permissions_missing_from_top_role() {
        let admin = RoleDefinition::new(
            Role::Admin,
            "Administrator",
            "Trimmed table",
            vec![PermissionEntry::granted(Permission::ManageUsers)],
        );
        assert!(admin.is_ok());

        let catalog = RoleCatalog::new(vec![admin.unwrap_or_else(|_| unreachable!())]);
        assert!(catalog.is_ok());

        let result = catalog.unwrap_or_else(|_| unreachable!()).validate_features();
        assert!(result.is_err());
    }

    #[test]
    fn empty_catalog_fails_feature_validation() {
        let catalog = RoleCatalog::new(Vec::new());
        assert!(catalog.is_ok());
        assert!(
            catalog
                .unwrap_or_else(|_| unreachable!())
                .validate_features()
                .is_err()
        );
    }

    fn role_strategy() -> impl Strategy<Value = Role> {
        prop::sample::select(Role::all().to_vec())
    }

    fn permission_strategy() -> impl Strategy<Value = Permission> {
        prop::sample::select(Permission::all().to_vec())
    }

    proptest! {
        #[test]
        fn grants_matches_the_listed_enabled_flag(
            role in role_strategy(),
            permission in permission_strategy(),
        ) {
            let catalog = RoleCatalog::builtin();
            let definition = catalog.definition(role);
            prop_assert!(definition.is_some());
            let definition = definition.unwrap_or_else(|| unreachable!());

            let expected = definition
                .permissions()
                .iter()
                .find(|entry| entry.permission() == permission)
                .is_some_and(PermissionEntry::enabled);
            prop_assert_eq!(definition.grants(permission), expected);
        }
    }
}
