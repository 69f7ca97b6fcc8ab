//! `coverdesk-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no transport or storage
//! concerns): identifiers, the closed authorization vocabulary, permission
//! and role records, the seed catalog, and the authenticated principal.

pub mod defaults;
pub mod error;
pub mod id;
pub mod permission;
pub mod principal;
pub mod role;
pub mod types;

pub use defaults::{default_permissions, default_roles};
pub use error::{DomainError, DomainResult};
pub use id::{PermissionId, PrincipalId, RoleId};
pub use permission::Permission;
pub use principal::SessionPrincipal;
pub use role::Role;
pub use types::{Action, AdminType, Resource, UserType};
