//! Permission records.

use serde::{Deserialize, Serialize};

use crate::id::PermissionId;
use crate::types::{Action, Resource};

/// A named grant of one action on one resource.
///
/// Two permissions are interchangeable for decision purposes when their
/// `(resource, action)` pairs match; `id`, `name` and `description` are
/// catalog metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: PermissionId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub resource: Resource,
    pub action: Action,
}

impl Permission {
    pub fn new(
        id: impl Into<PermissionId>,
        name: impl Into<String>,
        description: impl Into<String>,
        resource: Resource,
        action: Action,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            resource,
            action,
        }
    }

    /// Whether this permission satisfies a `(resource, action)` requirement.
    ///
    /// The resource must match exactly; the held action satisfies via
    /// [`Action::satisfies`], so `manage` covers everything on its resource.
    pub fn grants(&self, resource: Resource, action: Action) -> bool {
        self.resource == resource && self.action.satisfies(action)
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}:{}", self.resource, self.action)
    }
}
