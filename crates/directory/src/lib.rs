//! `coverdesk-directory` — role and permission lookup services.
//!
//! In-memory repositories behind narrow traits. The session consults the
//! role directory when refreshing a principal's entitlements; admin screens
//! drive the CRUD surface. Nothing here persists across process restarts;
//! durable storage is the backend's concern.

pub mod error;
pub mod permissions;
pub mod roles;

pub use error::DirectoryError;
pub use permissions::{InMemoryPermissionDirectory, PermissionDirectory, PermissionUpdate};
pub use roles::{InMemoryRoleDirectory, RoleDirectory, RoleUpdate};
