//! `coverdesk-gates` — declarative authorization guards for UI content.
//!
//! A gate pairs a piece of content with the rule that decides whether the
//! current principal may see it. Gates never perform IO and never panic;
//! every `render` re-evaluates against the principal passed in, and a
//! missing principal always denies.

pub mod component;
pub mod permission;

pub use component::ComponentGate;
pub use permission::{PermissionGate, RoleGate, UserTypeGate};
