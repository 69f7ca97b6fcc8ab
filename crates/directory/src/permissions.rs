//! Permission directory.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use coverdesk_core::{Action, Permission, PermissionId, Resource, default_permissions};

use crate::error::DirectoryError;

/// Partial update of a permission record. `None` fields are left unchanged.
#[derive(Debug, Default, Clone)]
pub struct PermissionUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub resource: Option<Resource>,
    pub action: Option<Action>,
}

/// Permission lookup and maintenance operations.
///
/// The `(resource, action)` pair is a natural key: the directory never
/// holds two permissions for the same pair.
pub trait PermissionDirectory: Send + Sync {
    fn all_permissions(&self) -> Vec<Permission>;

    fn permission_by_id(&self, id: &PermissionId) -> Option<Permission>;

    fn permissions_by_resource(&self, resource: Resource) -> Vec<Permission>;

    fn permissions_by_action(&self, action: Action) -> Vec<Permission>;

    fn permission_by_resource_action(&self, resource: Resource, action: Action) -> Option<Permission>;

    fn exists(&self, resource: Resource, action: Action) -> bool {
        self.permission_by_resource_action(resource, action).is_some()
    }

    /// Create a permission with a generated id. Rejects a duplicate
    /// `(resource, action)` pair with [`DirectoryError::Duplicate`].
    fn create_permission(
        &self,
        name: &str,
        description: &str,
        resource: Resource,
        action: Action,
    ) -> Result<Permission, DirectoryError>;

    /// Apply a partial update. The id never changes; moving the record onto
    /// another record's `(resource, action)` pair is rejected.
    fn update_permission(
        &self,
        id: &PermissionId,
        update: PermissionUpdate,
    ) -> Result<Permission, DirectoryError>;

    /// Returns true when a record was removed.
    fn delete_permission(&self, id: &PermissionId) -> bool;
}

impl<S> PermissionDirectory for Arc<S>
where
    S: PermissionDirectory + ?Sized,
{
    fn all_permissions(&self) -> Vec<Permission> {
        (**self).all_permissions()
    }

    fn permission_by_id(&self, id: &PermissionId) -> Option<Permission> {
        (**self).permission_by_id(id)
    }

    fn permissions_by_resource(&self, resource: Resource) -> Vec<Permission> {
        (**self).permissions_by_resource(resource)
    }

    fn permissions_by_action(&self, action: Action) -> Vec<Permission> {
        (**self).permissions_by_action(action)
    }

    fn permission_by_resource_action(&self, resource: Resource, action: Action) -> Option<Permission> {
        (**self).permission_by_resource_action(resource, action)
    }

    fn create_permission(
        &self,
        name: &str,
        description: &str,
        resource: Resource,
        action: Action,
    ) -> Result<Permission, DirectoryError> {
        (**self).create_permission(name, description, resource, action)
    }

    fn update_permission(
        &self,
        id: &PermissionId,
        update: PermissionUpdate,
    ) -> Result<Permission, DirectoryError> {
        (**self).update_permission(id, update)
    }

    fn delete_permission(&self, id: &PermissionId) -> bool {
        (**self).delete_permission(id)
    }
}

/// In-memory permission directory.
#[derive(Debug, Default)]
pub struct InMemoryPermissionDirectory {
    inner: RwLock<BTreeMap<PermissionId, Permission>>,
}

impl InMemoryPermissionDirectory {
    /// An empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// A directory pre-populated with the seed permission catalog.
    pub fn seeded() -> Self {
        let directory = Self::new();
        if let Ok(mut map) = directory.inner.write() {
            for permission in default_permissions() {
                map.insert(permission.id.clone(), permission);
            }
        }
        directory
    }
}

impl PermissionDirectory for InMemoryPermissionDirectory {
    fn all_permissions(&self) -> Vec<Permission> {
        match self.inner.read() {
            Ok(map) => map.values().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    fn permission_by_id(&self, id: &PermissionId) -> Option<Permission> {
        let map = self.inner.read().ok()?;
        map.get(id).cloned()
    }

    fn permissions_by_resource(&self, resource: Resource) -> Vec<Permission> {
        self.all_permissions().into_iter().filter(|p| p.resource == resource).collect()
    }

    fn permissions_by_action(&self, action: Action) -> Vec<Permission> {
        self.all_permissions().into_iter().filter(|p| p.action == action).collect()
    }

    fn permission_by_resource_action(&self, resource: Resource, action: Action) -> Option<Permission> {
        self.all_permissions()
            .into_iter()
            .find(|p| p.resource == resource && p.action == action)
    }

    fn create_permission(
        &self,
        name: &str,
        description: &str,
        resource: Resource,
        action: Action,
    ) -> Result<Permission, DirectoryError> {
        if name.trim().is_empty() {
            return Err(DirectoryError::validation("permission name must not be empty"));
        }
        if self.exists(resource, action) {
            return Err(DirectoryError::duplicate(resource, action));
        }

        let permission = Permission::new(PermissionId::generate(), name, description, resource, action);
        if let Ok(mut map) = self.inner.write() {
            map.insert(permission.id.clone(), permission.clone());
        }
        Ok(permission)
    }

    fn update_permission(
        &self,
        id: &PermissionId,
        update: PermissionUpdate,
    ) -> Result<Permission, DirectoryError> {
        let mut map = self.inner.write().map_err(|_| DirectoryError::NotFound)?;

        let current = map.get(id).ok_or(DirectoryError::NotFound)?;
        let resource = update.resource.unwrap_or(current.resource);
        let action = update.action.unwrap_or(current.action);

        let collides = map
            .values()
            .any(|p| &p.id != id && p.resource == resource && p.action == action);
        if collides {
            return Err(DirectoryError::duplicate(resource, action));
        }

        let permission = map.get_mut(id).ok_or(DirectoryError::NotFound)?;
        if let Some(name) = update.name {
            if name.trim().is_empty() {
                return Err(DirectoryError::validation("permission name must not be empty"));
            }
            permission.name = name;
        }
        if let Some(description) = update.description {
            permission.description = description;
        }
        permission.resource = resource;
        permission.action = action;
        Ok(permission.clone())
    }

    fn delete_permission(&self, id: &PermissionId) -> bool {
        match self.inner.write() {
            Ok(mut map) => map.remove(id).is_some(),
            Err(_) => false,
        }
    }
}
