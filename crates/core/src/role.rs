//! Role records.

use serde::{Deserialize, Serialize};

use crate::id::{PermissionId, RoleId};
use crate::permission::Permission;
use crate::types::{Action, Resource};

/// A named bundle of permissions assignable to principals.
///
/// # Invariants
/// - `permissions` never holds two entries with the same permission id
///   (enforced by the directory on assignment).
/// - Role names are compared case-insensitively everywhere (`ADMIN` and
///   `admin` are the same role name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl Role {
    pub fn new(
        id: impl Into<RoleId>,
        name: impl Into<String>,
        description: impl Into<String>,
        permissions: Vec<Permission>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            permissions,
        }
    }

    /// Whether any permission in this role satisfies the requirement.
    pub fn grants(&self, resource: Resource, action: Action) -> bool {
        self.permissions.iter().any(|p| p.grants(resource, action))
    }

    pub fn holds_permission(&self, id: &PermissionId) -> bool {
        self.permissions.iter().any(|p| &p.id == id)
    }

    /// Case-insensitive role-name comparison.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.name)
    }
}
