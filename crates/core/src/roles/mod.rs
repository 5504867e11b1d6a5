//! Named portal roles and their permission subsets.
//!
//! Group and permission records are seeded from this catalog, so the mapping
//! from role to permissions is deterministic and identical on every deploy.

use serde::{Deserialize, Serialize};

/// Actions a permission can grant on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionAction {
    /// Create new records.
    Add,
    /// Edit existing records.
    Change,
    /// Delete records.
    Delete,
    /// Read records.
    View,
}

impl PermissionAction {
    /// All actions, in codename order.
    pub const ALL: [Self; 4] = [Self::Add, Self::Change, Self::Delete, Self::View];

    /// Returns the codename prefix for this action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Change => "change",
            Self::Delete => "delete",
            Self::View => "view",
        }
    }
}

/// Resources guarded by permissions. One entry per managed record type.
pub const RESOURCES: &[&str] = &[
    "user",
    "profile",
    "address",
    "wmuuser",
    "department",
    "roomtype",
    "room",
    "major",
    "semester",
    "asset",
    "software",
    "softwaredetail",
    "tutorlocation",
    "usagelog",
    "payperiod",
    "timesheetshift",
];

/// Resources belonging to the Success Center subsystem.
const SUCCESS_CENTER_RESOURCES: &[&str] = &["tutorlocation", "usagelog", "payperiod", "timesheetshift"];

/// A single permission: an action on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Permission {
    /// What the permission allows.
    pub action: PermissionAction,
    /// The resource it applies to.
    pub resource: &'static str,
}

impl Permission {
    /// Returns the stable codename, e.g. `add_room`.
    #[must_use]
    pub fn codename(&self) -> String {
        format!("{}_{}", self.action.as_str(), self.resource)
    }

    /// Returns the human-readable name, e.g. `Can add room`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("Can {} {}", self.action.as_str(), self.resource)
    }
}

/// Every permission in the catalog, in stable order.
#[must_use]
pub fn all_permissions() -> Vec<Permission> {
    RESOURCES
        .iter()
        .flat_map(|resource| {
            PermissionAction::ALL
                .into_iter()
                .map(move |action| Permission { action, resource })
        })
        .collect()
}

/// The fixed set of portal roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortalRole {
    /// Department director.
    Director,
    /// Building coordinator.
    BuildingCoordinator,
    /// Graduate assistant on the admin team.
    AdminGa,
    /// Graduate assistant on the programming team.
    ProgrammerGa,
    /// Admin team member.
    Admin,
    /// Programming team member.
    Programmer,
    /// Front-desk attendant.
    Attendant,
    /// Success Center administrator.
    StepAdmin,
    /// Success Center front-desk employee.
    StepEmployee,
}

impl PortalRole {
    /// All roles, in seeding order.
    pub const ALL: [Self; 9] = [
        Self::Director,
        Self::BuildingCoordinator,
        Self::AdminGa,
        Self::ProgrammerGa,
        Self::Admin,
        Self::Programmer,
        Self::Attendant,
        Self::StepAdmin,
        Self::StepEmployee,
    ];

    /// Roles whose members may not be auto-deactivated by directory sync.
    /// These people must keep portal access even when the main campus
    /// directory is misbehaving.
    pub const PROTECTED: [Self; 3] = [Self::Director, Self::AdminGa, Self::ProgrammerGa];

    /// Roles that grant staff-level access.
    pub const STAFF: [Self; 5] = [
        Self::Director,
        Self::BuildingCoordinator,
        Self::AdminGa,
        Self::ProgrammerGa,
        Self::Programmer,
    ];

    /// Returns the group name as stored in the database.
    #[must_use]
    pub const fn group_name(self) -> &'static str {
        match self {
            Self::Director => "CAE Director",
            Self::BuildingCoordinator => "CAE Building Coordinator",
            Self::AdminGa => "CAE Admin GA",
            Self::ProgrammerGa => "CAE Programmer GA",
            Self::Admin => "CAE Admin",
            Self::Programmer => "CAE Programmer",
            Self::Attendant => "CAE Attendant",
            Self::StepAdmin => "STEP Admin",
            Self::StepEmployee => "STEP Employee",
        }
    }

    /// Looks a role up by its stored group name.
    #[must_use]
    pub fn from_group_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.group_name() == name)
    }

    /// Returns the permission subset for this role.
    ///
    /// Management and programming roles hold everything. The admin team gets
    /// the department-scoped subset (no creating or deleting login users or
    /// profiles), attendants only the add-level slice of that plus user
    /// edits, and the Success Center roles are scoped to their subsystem.
    #[must_use]
    pub fn permissions(self) -> Vec<Permission> {
        match self {
            Self::Director
            | Self::BuildingCoordinator
            | Self::AdminGa
            | Self::ProgrammerGa
            | Self::Programmer => all_permissions(),
            Self::Admin => admin_permissions(),
            Self::Attendant => admin_permissions()
                .into_iter()
                .filter(|p| {
                    p.action == PermissionAction::Add
                        || (p.action == PermissionAction::Change && p.resource == "user")
                })
                .collect(),
            Self::StepAdmin => all_permissions()
                .into_iter()
                .filter(|p| SUCCESS_CENTER_RESOURCES.contains(&p.resource))
                .collect(),
            Self::StepEmployee => vec![
                Permission {
                    action: PermissionAction::Add,
                    resource: "usagelog",
                },
                Permission {
                    action: PermissionAction::Change,
                    resource: "usagelog",
                },
                Permission {
                    action: PermissionAction::View,
                    resource: "usagelog",
                },
                Permission {
                    action: PermissionAction::View,
                    resource: "tutorlocation",
                },
            ],
        }
    }
}

/// The admin team's subset: everything except creating or deleting login
/// users and profiles.
fn admin_permissions() -> Vec<Permission> {
    all_permissions()
        .into_iter()
        .filter(|p| {
            !(matches!(p.action, PermissionAction::Add | PermissionAction::Delete)
                && matches!(p.resource, "user" | "profile"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_no_duplicates() {
        let all = all_permissions();
        let unique: HashSet<String> = all.iter().map(Permission::codename).collect();
        assert_eq!(all.len(), unique.len());
        assert_eq!(all.len(), RESOURCES.len() * PermissionAction::ALL.len());
    }

    #[test]
    fn test_management_roles_hold_everything() {
        let total = all_permissions().len();
        for role in [
            PortalRole::Director,
            PortalRole::BuildingCoordinator,
            PortalRole::AdminGa,
            PortalRole::ProgrammerGa,
            PortalRole::Programmer,
        ] {
            assert_eq!(role.permissions().len(), total, "{role:?}");
        }
    }

    #[test]
    fn test_admin_cannot_create_or_delete_users() {
        let perms: HashSet<String> = PortalRole::Admin
            .permissions()
            .iter()
            .map(Permission::codename)
            .collect();

        assert!(!perms.contains("add_user"));
        assert!(!perms.contains("delete_user"));
        assert!(!perms.contains("add_profile"));
        assert!(!perms.contains("delete_profile"));
        assert!(perms.contains("change_user"));
        assert!(perms.contains("add_room"));
    }

    #[test]
    fn test_attendant_is_add_only_plus_user_change() {
        let perms = PortalRole::Attendant.permissions();
        for p in &perms {
            assert!(
                p.action == PermissionAction::Add
                    || (p.action == PermissionAction::Change && p.resource == "user"),
                "unexpected permission {:?}",
                p.codename()
            );
        }
        // Attendants still cannot create login users.
        assert!(!perms.iter().any(|p| p.codename() == "add_user"));
    }

    #[test]
    fn test_step_roles_are_subsystem_scoped() {
        for p in PortalRole::StepAdmin.permissions() {
            assert!(SUCCESS_CENTER_RESOURCES.contains(&p.resource));
        }
        let employee: HashSet<String> = PortalRole::StepEmployee
            .permissions()
            .iter()
            .map(Permission::codename)
            .collect();
        assert!(employee.contains("add_usagelog"));
        assert!(!employee.contains("delete_usagelog"));
    }

    #[test]
    fn test_group_name_round_trip() {
        for role in PortalRole::ALL {
            assert_eq!(PortalRole::from_group_name(role.group_name()), Some(role));
        }
        assert_eq!(PortalRole::from_group_name("No Such Group"), None);
    }

    #[test]
    fn test_permissions_are_deterministic() {
        for role in PortalRole::ALL {
            let first: Vec<String> = role.permissions().iter().map(Permission::codename).collect();
            let second: Vec<String> =
                role.permissions().iter().map(Permission::codename).collect();
            assert_eq!(first, second);
        }
    }
}
