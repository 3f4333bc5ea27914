//! Gating wrappers used when assembling dashboard views.

use lantern_domain::{Feature, Permission, Role};

use crate::access_guard::{AccessGuard, AccessRequirement};

/// A check that decides between protected content and a fallback.
pub trait Gate {
    /// Returns whether the session passes this gate.
    fn allows(&self, guard: &AccessGuard) -> bool;

    /// Produces `content` when allowed and `fallback` otherwise.
    ///
    /// Only the chosen branch is evaluated.
    fn render<T>(
        &self,
        guard: &AccessGuard,
        content: impl FnOnce() -> T,
        fallback: impl FnOnce() -> T,
    ) -> T {
        if self.allows(guard) {
            content()
        } else {
            fallback()
        }
    }
}

/// Gate on role-set membership.
#[derive(Debug, Clone, Copy)]
pub struct RoleGate<'a> {
    roles: &'a [Role],
}

impl<'a> RoleGate<'a> {
    /// Creates a gate passing any of `roles`. An empty slice passes everyone.
    #[must_use]
    pub fn new(roles: &'a [Role]) -> Self {
        Self { roles }
    }
}

impl Gate for RoleGate<'_> {
    fn allows(&self, guard: &AccessGuard) -> bool {
        guard.has_role(self.roles)
    }
}

/// Gate on a single permission.
#[derive(Debug, Clone, Copy)]
pub struct PermissionGate {
    permission: Permission,
}

impl PermissionGate {
    /// Creates a gate for `permission`.
    #[must_use]
    pub fn new(permission: Permission) -> Self {
        Self { permission }
    }
}

impl Gate for PermissionGate {
    fn allows(&self, guard: &AccessGuard) -> bool {
        guard.has_permission(self.permission)
    }
}

/// How a navigation link behaves when access is denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateMode {
    /// Leave the link out entirely.
    #[default]
    Hide,
    /// Render the link greyed out with an explanatory tooltip.
    Disable,
}

/// A navigation entry guarded by an access requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    /// Visible label.
    pub label: String,
    /// Link target.
    pub href: String,
    /// Requirement the session must satisfy.
    pub requirement: AccessRequirement,
}

impl NavLink {
    /// Creates a navigation link.
    #[must_use]
    pub fn new(
        label: impl Into<String>,
        href: impl Into<String>,
        requirement: AccessRequirement,
    ) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
            requirement,
        }
    }
}

/// Navigation link after gating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNavLink {
    /// Visible label.
    pub label: String,
    /// Link target, absent when disabled.
    pub href: Option<String>,
    /// Whether the link is rendered disabled.
    pub disabled: bool,
    /// Explanation shown on hover when disabled.
    pub tooltip: Option<String>,
}

/// Gate adapting navigation links to the caller's chosen [`GateMode`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NavLinkGate {
    mode: GateMode,
}

impl NavLinkGate {
    /// Creates a navigation gate.
    #[must_use]
    pub fn new(mode: GateMode) -> Self {
        Self { mode }
    }

    /// Gates one link. Returns `None` when the link must be hidden.
    #[must_use]
    pub fn apply(&self, guard: &AccessGuard, link: &NavLink) -> Option<RenderedNavLink> {
        if guard.satisfies(link.requirement) {
            return Some(RenderedNavLink {
                label: link.label.clone(),
                href: Some(link.href.clone()),
                disabled: false,
                tooltip: None,
            });
        }

        match self.mode {
            GateMode::Hide => None,
            GateMode::Disable => Some(RenderedNavLink {
                label: link.label.clone(),
                href: None,
                disabled: true,
                tooltip: Some(format!(
                    "You don't have permission to access {}",
                    link.label
                )),
            }),
        }
    }

    /// Gates a list of links, dropping hidden ones.
    #[must_use]
    pub fn apply_all(&self, guard: &AccessGuard, links: &[NavLink]) -> Vec<RenderedNavLink> {
        links
            .iter()
            .filter_map(|link| self.apply(guard, link))
            .collect()
    }
}

/// Returns the gated sections of the admin dashboard sidebar.
#[must_use]
pub fn dashboard_navigation() -> Vec<NavLink> {
    vec![
        NavLink::new(
            "Cases",
            "/dashboard/cases",
            AccessRequirement::Feature(Feature::Cases),
        ),
        NavLink::new(
            "Case Assignment",
            "/dashboard/cases/assign",
            AccessRequirement::Feature(Feature::CaseAssignment),
        ),
        NavLink::new(
            "Donations",
            "/dashboard/donations",
            AccessRequirement::Feature(Feature::Donations),
        ),
        NavLink::new(
            "Reports",
            "/dashboard/reports",
            AccessRequirement::Feature(Feature::Reports),
        ),
        NavLink::new(
            "Users",
            "/dashboard/users",
            AccessRequirement::Permission(Permission::ManageUsers),
        ),
        NavLink::new(
            "Settings",
            "/dashboard/settings",
            AccessRequirement::Permission(Permission::ManageSettings),
        ),
    ]
}
