use std::fmt::{Display, Formatter};
use std::str::FromStr;

use lantern_core::AppError;
use serde::{Deserialize, Serialize};

/// Dashboard roles, declared from highest to lowest privilege.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Full control over the organization's dashboard.
    Admin,
    /// Oversees case work, donations, and reporting.
    Manager,
    /// Works the cases assigned to them.
    CaseWorker,
    /// Read-only access to reports.
    Viewer,
}

impl Role {
    /// Returns a stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::CaseWorker => "case-worker",
            Self::Viewer => "viewer",
        }
    }

    /// Returns all known roles, highest privilege first.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Role] = &[Role::Admin, Role::Manager, Role::CaseWorker, Role::Viewer];

        ALL
    }

    /// Returns the explicit privilege rank. Higher means more privileged.
    #[must_use]
    pub fn rank(&self) -> u8 {
        match self {
            Self::Admin => 3,
            Self::Manager => 2,
            Self::CaseWorker => 1,
            Self::Viewer => 0,
        }
    }

    /// Returns whether this role holds strictly more privilege than `other`.
    #[must_use]
    pub fn outranks(&self, other: Role) -> bool {
        self.rank() > other.rank()
    }
}

impl Display for Role {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "case-worker" => Ok(Self::CaseWorker),
            "viewer" => Ok(Self::Viewer),
            _ => Err(AppError::Validation(format!("unknown role value '{value}'"))),
        }
    }
}

/// Permissions consulted by dashboard guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Allows creating, editing, and deactivating staff accounts.
    ManageUsers,
    /// Allows changing organization-wide settings.
    ManageSettings,
    /// Allows viewing every case in the organization.
    ViewAllCases,
    /// Allows viewing cases assigned to the current user.
    ViewAssignedCases,
    /// Allows assigning cases to case workers.
    AssignCases,
    /// Allows updating case notes and status.
    EditCases,
    /// Allows recording and refunding donations.
    ManageDonations,
    /// Allows opening the reports area.
    AccessReports,
    /// Allows exporting report data.
    ExportData,
}

impl Permission {
    /// Returns a stable storage value for this permission.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ManageUsers => "manage_users",
            Self::ManageSettings => "manage_settings",
            Self::ViewAllCases => "view_all_cases",
            Self::ViewAssignedCases => "view_assigned_cases",
            Self::AssignCases => "assign_cases",
            Self::EditCases => "edit_cases",
            Self::ManageDonations => "manage_donations",
            Self::AccessReports => "access_reports",
            Self::ExportData => "export_data",
        }
    }

    /// Returns the default human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::ManageUsers => "Create, edit, and deactivate staff accounts",
            Self::ManageSettings => "Change organization settings",
            Self::ViewAllCases => "View every case in the organization",
            Self::ViewAssignedCases => "View cases assigned to you",
            Self::AssignCases => "Assign cases to case workers",
            Self::EditCases => "Update case notes and status",
            Self::ManageDonations => "Record and refund donations",
            Self::AccessReports => "Open dashboards and reports",
            Self::ExportData => "Export report data",
        }
    }

    /// Returns all known permissions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Permission] = &[
            Permission::ManageUsers,
            Permission::ManageSettings,
            Permission::ViewAllCases,
            Permission::ViewAssignedCases,
            Permission::AssignCases,
            Permission::EditCases,
            Permission::ManageDonations,
            Permission::AccessReports,
            Permission::ExportData,
        ];

        ALL
    }

    /// Parses a transport value into a permission.
    pub fn from_transport(value: &str) -> Result<Self, AppError> {
        Self::from_str(value)
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "manage_users" => Ok(Self::ManageUsers),
            "manage_settings" => Ok(Self::ManageSettings),
            "view_all_cases" => Ok(Self::ViewAllCases),
            "view_assigned_cases" => Ok(Self::ViewAssignedCases),
            "assign_cases" => Ok(Self::AssignCases),
            "edit_cases" => Ok(Self::EditCases),
            "manage_donations" => Ok(Self::ManageDonations),
            "access_reports" => Ok(Self::AccessReports),
            "export_data" => Ok(Self::ExportData),
            _ => Err(AppError::Validation(format!(
                "unknown permission value '{value}'"
            ))),
        }
    }
}

/// Gated dashboard features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    /// Staff account administration.
    UserManagement,
    /// Organization settings.
    Settings,
    /// Case lists and case detail pages.
    Cases,
    /// Case assignment board.
    CaseAssignment,
    /// Donation ledger.
    Donations,
    /// Dashboards and exports.
    Reports,
}

impl Feature {
    /// Returns a stable transport value for this feature.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserManagement => "user-management",
            Self::Settings => "settings",
            Self::Cases => "cases",
            Self::CaseAssignment => "case-assignment",
            Self::Donations => "donations",
            Self::Reports => "reports",
        }
    }

    /// Returns all known features.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Feature] = &[
            Feature::UserManagement,
            Feature::Settings,
            Feature::Cases,
            Feature::CaseAssignment,
            Feature::Donations,
            Feature::Reports,
        ];

        ALL
    }

    /// Returns the permissions that unlock this feature.
    ///
    /// Holding any one of them is sufficient.
    #[must_use]
    pub fn required_permissions(&self) -> &'static [Permission] {
        match self {
            Self::UserManagement => &[Permission::ManageUsers],
            Self::Settings => &[Permission::ManageSettings],
            Self::Cases => &[Permission::ViewAllCases, Permission::ViewAssignedCases],
            Self::CaseAssignment => &[Permission::AssignCases],
            Self::Donations => &[Permission::ManageDonations],
            Self::Reports => &[Permission::AccessReports, Permission::ExportData],
        }
    }
}

impl FromStr for Feature {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user-management" => Ok(Self::UserManagement),
            "settings" => Ok(Self::Settings),
            "cases" => Ok(Self::Cases),
            "case-assignment" => Ok(Self::CaseAssignment),
            "donations" => Ok(Self::Donations),
            "reports" => Ok(Self::Reports),
            _ => Err(AppError::Validation(format!(
                "unknown feature value '{value}'"
            ))),
        }
    }
}
