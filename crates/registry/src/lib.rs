//! `coverdesk-registry` — component catalog and access decision functions.
//!
//! The registry answers one question: may this account use this UI
//! capability? It owns the closed component catalog, the per-user-type
//! allow table, the admin-subtype bonus table, and the pure decision
//! functions that combine them. No IO, no session state.

pub mod access;
pub mod component;
pub mod table;

pub use access::{
    AccessExplanation, MatchedRule, can_access_component, can_access_component_by_permission,
    components_for_resource_action, explain_component_access,
};
pub use component::ComponentId;
pub use table::{admin_type_bonus, components_for_user_type};
