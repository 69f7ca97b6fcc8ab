//! Role directory.
//!
//! The lookup service the session consults for role records and
//! user-to-role assignments. Callers own the directory's lifetime; there is
//! no module-level state.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use coverdesk_core::{Permission, PermissionId, PrincipalId, Role, RoleId, UserType, default_roles};

use crate::error::DirectoryError;

/// Partial update of a role record. `None` fields are left unchanged.
#[derive(Debug, Default, Clone)]
pub struct RoleUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub permissions: Option<Vec<Permission>>,
}

/// Role lookup and maintenance operations.
///
/// All operations are synchronous; implementations must be safe to share
/// across threads.
pub trait RoleDirectory: Send + Sync {
    fn all_roles(&self) -> Vec<Role>;

    fn role_by_id(&self, id: &RoleId) -> Option<Role>;

    /// Create a role with a generated id.
    fn create_role(
        &self,
        name: &str,
        description: &str,
        permissions: Vec<Permission>,
    ) -> Result<Role, DirectoryError>;

    /// Apply a partial update. The id never changes.
    fn update_role(&self, id: &RoleId, update: RoleUpdate) -> Result<Role, DirectoryError>;

    /// Returns true when a record was removed.
    fn delete_role(&self, id: &RoleId) -> bool;

    fn role_permissions(&self, id: &RoleId) -> Vec<Permission>;

    /// Add a permission to a role. Assigning an already-held permission id
    /// is a no-op, not an error.
    fn assign_permission_to_role(
        &self,
        role_id: &RoleId,
        permission: Permission,
    ) -> Result<Role, DirectoryError>;

    fn remove_permission_from_role(
        &self,
        role_id: &RoleId,
        permission_id: &PermissionId,
    ) -> Result<Role, DirectoryError>;

    /// The roles a user type is entitled to, by naming convention.
    ///
    /// Session refresh merges this into the principal's held roles.
    fn roles_for_user_type(&self, user_type: UserType) -> Vec<Role>;

    /// Record a user-to-role assignment and return the user's roles.
    /// Assigning an already-held role is a no-op.
    fn assign_role_to_user(
        &self,
        user_id: &PrincipalId,
        role_id: &RoleId,
    ) -> Result<Vec<Role>, DirectoryError>;

    fn remove_role_from_user(
        &self,
        user_id: &PrincipalId,
        role_id: &RoleId,
    ) -> Result<Vec<Role>, DirectoryError>;

    fn user_roles(&self, user_id: &PrincipalId) -> Vec<Role>;
}

impl<S> RoleDirectory for Arc<S>
where
    S: RoleDirectory + ?Sized,
{
    fn all_roles(&self) -> Vec<Role> {
        (**self).all_roles()
    }

    fn role_by_id(&self, id: &RoleId) -> Option<Role> {
        (**self).role_by_id(id)
    }

    fn create_role(
        &self,
        name: &str,
        description: &str,
        permissions: Vec<Permission>,
    ) -> Result<Role, DirectoryError> {
        (**self).create_role(name, description, permissions)
    }

    fn update_role(&self, id: &RoleId, update: RoleUpdate) -> Result<Role, DirectoryError> {
        (**self).update_role(id, update)
    }

    fn delete_role(&self, id: &RoleId) -> bool {
        (**self).delete_role(id)
    }

    fn role_permissions(&self, id: &RoleId) -> Vec<Permission> {
        (**self).role_permissions(id)
    }

    fn assign_permission_to_role(
        &self,
        role_id: &RoleId,
        permission: Permission,
    ) -> Result<Role, DirectoryError> {
        (**self).assign_permission_to_role(role_id, permission)
    }

    fn remove_permission_from_role(
        &self,
        role_id: &RoleId,
        permission_id: &PermissionId,
    ) -> Result<Role, DirectoryError> {
        (**self).remove_permission_from_role(role_id, permission_id)
    }

    fn roles_for_user_type(&self, user_type: UserType) -> Vec<Role> {
        (**self).roles_for_user_type(user_type)
    }

    fn assign_role_to_user(
        &self,
        user_id: &PrincipalId,
        role_id: &RoleId,
    ) -> Result<Vec<Role>, DirectoryError> {
        (**self).assign_role_to_user(user_id, role_id)
    }

    fn remove_role_from_user(
        &self,
        user_id: &PrincipalId,
        role_id: &RoleId,
    ) -> Result<Vec<Role>, DirectoryError> {
        (**self).remove_role_from_user(user_id, role_id)
    }

    fn user_roles(&self, user_id: &PrincipalId) -> Vec<Role> {
        (**self).user_roles(user_id)
    }
}

#[derive(Debug, Default)]
struct RoleState {
    roles: BTreeMap<RoleId, Role>,
    assignments: BTreeMap<PrincipalId, Vec<RoleId>>,
}

/// In-memory role directory.
#[derive(Debug, Default)]
pub struct InMemoryRoleDirectory {
    inner: RwLock<RoleState>,
}

impl InMemoryRoleDirectory {
    /// An empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// A directory pre-populated with the seed role catalog.
    pub fn seeded() -> Self {
        let directory = Self::new();
        if let Ok(mut state) = directory.inner.write() {
            for role in default_roles() {
                state.roles.insert(role.id.clone(), role);
            }
        }
        directory
    }
}

impl RoleDirectory for InMemoryRoleDirectory {
    fn all_roles(&self) -> Vec<Role> {
        match self.inner.read() {
            Ok(state) => state.roles.values().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    fn role_by_id(&self, id: &RoleId) -> Option<Role> {
        let state = self.inner.read().ok()?;
        state.roles.get(id).cloned()
    }

    fn create_role(
        &self,
        name: &str,
        description: &str,
        permissions: Vec<Permission>,
    ) -> Result<Role, DirectoryError> {
        if name.trim().is_empty() {
            return Err(DirectoryError::validation("role name must not be empty"));
        }
        if description.trim().is_empty() {
            return Err(DirectoryError::validation("role description must not be empty"));
        }

        let role = Role::new(RoleId::generate(), name, description, permissions);
        if let Ok(mut state) = self.inner.write() {
            state.roles.insert(role.id.clone(), role.clone());
        }
        Ok(role)
    }

    fn update_role(&self, id: &RoleId, update: RoleUpdate) -> Result<Role, DirectoryError> {
        let mut state = self.inner.write().map_err(|_| DirectoryError::NotFound)?;
        let role = state.roles.get_mut(id).ok_or(DirectoryError::NotFound)?;

        if let Some(name) = update.name {
            if name.trim().is_empty() {
                return Err(DirectoryError::validation("role name must not be empty"));
            }
            role.name = name;
        }
        if let Some(description) = update.description {
            role.description = description;
        }
        if let Some(permissions) = update.permissions {
            role.permissions = permissions;
        }
        Ok(role.clone())
    }

    fn delete_role(&self, id: &RoleId) -> bool {
        match self.inner.write() {
            Ok(mut state) => {
                let removed = state.roles.remove(id).is_some();
                if removed {
                    for held in state.assignments.values_mut() {
                        held.retain(|role_id| role_id != id);
                    }
                }
                removed
            }
            Err(_) => false,
        }
    }

    fn role_permissions(&self, id: &RoleId) -> Vec<Permission> {
        self.role_by_id(id).map(|role| role.permissions).unwrap_or_default()
    }

    fn assign_permission_to_role(
        &self,
        role_id: &RoleId,
        permission: Permission,
    ) -> Result<Role, DirectoryError> {
        let mut state = self.inner.write().map_err(|_| DirectoryError::NotFound)?;
        let role = state.roles.get_mut(role_id).ok_or(DirectoryError::NotFound)?;

        if !role.holds_permission(&permission.id) {
            role.permissions.push(permission);
        }
        Ok(role.clone())
    }

    fn remove_permission_from_role(
        &self,
        role_id: &RoleId,
        permission_id: &PermissionId,
    ) -> Result<Role, DirectoryError> {
        let mut state = self.inner.write().map_err(|_| DirectoryError::NotFound)?;
        let role = state.roles.get_mut(role_id).ok_or(DirectoryError::NotFound)?;

        role.permissions.retain(|p| &p.id != permission_id);
        Ok(role.clone())
    }

    fn roles_for_user_type(&self, user_type: UserType) -> Vec<Role> {
        let contains = |role: &Role, needle: &str| role.name.to_ascii_uppercase().contains(needle);

        self.all_roles()
            .into_iter()
            .filter(|role| match user_type {
                UserType::Admin => role.is_named("ADMIN"),
                UserType::InsuranceAdmin => role.is_named("ADMIN") || contains(role, "INSURANCE"),
                UserType::ProviderAdmin => role.is_named("ADMIN") || contains(role, "PROVIDER"),
                UserType::CorporateAdmin => role.is_named("CORPORATE"),
                UserType::Staff | UserType::InsuranceStaff => role.is_named("STAFF"),
                UserType::Member => role.is_named("MEMBER"),
                UserType::Provider => role.is_named("PROVIDER"),
            })
            .collect()
    }

    fn assign_role_to_user(
        &self,
        user_id: &PrincipalId,
        role_id: &RoleId,
    ) -> Result<Vec<Role>, DirectoryError> {
        let mut state = self.inner.write().map_err(|_| DirectoryError::NotFound)?;
        if !state.roles.contains_key(role_id) {
            return Err(DirectoryError::NotFound);
        }

        let held = state.assignments.entry(user_id.clone()).or_default();
        if !held.contains(role_id) {
            held.push(role_id.clone());
        }

        let held = held.clone();
        Ok(resolve_roles(&state, &held))
    }

    fn remove_role_from_user(
        &self,
        user_id: &PrincipalId,
        role_id: &RoleId,
    ) -> Result<Vec<Role>, DirectoryError> {
        let mut state = self.inner.write().map_err(|_| DirectoryError::NotFound)?;

        if let Some(held) = state.assignments.get_mut(user_id) {
            held.retain(|id| id != role_id);
        }

        let held = state.assignments.get(user_id).cloned().unwrap_or_default();
        Ok(resolve_roles(&state, &held))
    }

    fn user_roles(&self, user_id: &PrincipalId) -> Vec<Role> {
        match self.inner.read() {
            Ok(state) => {
                let held = state.assignments.get(user_id).cloned().unwrap_or_default();
                resolve_roles(&state, &held)
            }
            Err(_) => Vec::new(),
        }
    }
}

fn resolve_roles(state: &RoleState, ids: &[RoleId]) -> Vec<Role> {
    ids.iter().filter_map(|id| state.roles.get(id).cloned()).collect()
}
