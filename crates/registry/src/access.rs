//! Component access decisions.
//!
//! - No IO
//! - No panics
//! - No allocation on the grant/deny path
//!
//! Deny is the default: every combination the tables do not name is false.

use serde::Serialize;

use coverdesk_core::{Action, AdminType, Resource, UserType};

use crate::component::ComponentId;
use crate::table::{admin_type_bonus, components_for_user_type};

/// Decide whether `user_type` (optionally carrying `admin_type`) may use
/// `component`.
///
/// Rule order:
/// 1. A `SYSTEM_ADMIN` subtype is an absolute override.
/// 2. The user-type allow table.
/// 3. The admin-subtype bonus table.
pub fn can_access_component(
    user_type: UserType,
    component: ComponentId,
    admin_type: Option<AdminType>,
) -> bool {
    if admin_type == Some(AdminType::SystemAdmin) {
        return true;
    }

    let allowed = components_for_user_type(user_type);
    if allowed.contains(&component) {
        return true;
    }

    match admin_type {
        Some(subtype) => admin_type_bonus(subtype).contains(&component),
        None => false,
    }
}

/// Components unlocked by holding `action` on `resource`.
///
/// The bridge is deliberately partial: only user management and insurance
/// company management are keyed to record permissions today. Every other
/// pair returns the empty slice, so permission-driven checks deny rather
/// than guess. `manage` is not expanded here; the bridge is exact-action.
pub fn components_for_resource_action(resource: Resource, action: Action) -> &'static [ComponentId] {
    use ComponentId::*;

    match (resource, action) {
        (Resource::Users, Action::Read) => &[UserList],
        (Resource::Users, Action::Create) => &[UserCreate],
        (Resource::Users, Action::Update) => &[UserEdit],
        (Resource::Users, Action::Delete) => &[UserDelete],
        (Resource::InsuranceCompanies, Action::Read) => &[InsuranceList],
        (Resource::InsuranceCompanies, Action::Create) => &[InsuranceCreate],
        (Resource::InsuranceCompanies, Action::Update) => &[InsuranceEdit],
        (Resource::InsuranceCompanies, Action::Delete) => &[InsuranceDelete],
        _ => &[],
    }
}

/// Whether holding `action` on `resource` unlocks `component`.
pub fn can_access_component_by_permission(
    resource: Resource,
    action: Action,
    component: ComponentId,
) -> bool {
    components_for_resource_action(resource, action).contains(&component)
}

// ─────────────────────────────────────────────────────────────────────────────
// Decision explanation (audit trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Which rule produced a component access decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchedRule {
    /// `SYSTEM_ADMIN` subtype override.
    SystemAdminOverride,
    /// The component is in the user type's allow table.
    UserTypeTable,
    /// The component is in the admin subtype's bonus table.
    AdminTypeBonus,
    /// Nothing matched; access denied.
    DeniedNoMatch,
}

/// Detailed explanation of a component access decision.
///
/// Answers "why was this surface shown or hidden" for audit and debug
/// tooling. [`explain_component_access`] and [`can_access_component`]
/// always agree on `granted`.
#[derive(Debug, Clone, Serialize)]
pub struct AccessExplanation {
    pub component: ComponentId,
    pub user_type: UserType,
    pub admin_type: Option<AdminType>,
    pub granted: bool,
    pub rule: MatchedRule,
}

/// Explain a component access decision.
pub fn explain_component_access(
    user_type: UserType,
    component: ComponentId,
    admin_type: Option<AdminType>,
) -> AccessExplanation {
    let rule = if admin_type == Some(AdminType::SystemAdmin) {
        MatchedRule::SystemAdminOverride
    } else if components_for_user_type(user_type).contains(&component) {
        MatchedRule::UserTypeTable
    } else if admin_type.is_some_and(|subtype| admin_type_bonus(subtype).contains(&component)) {
        MatchedRule::AdminTypeBonus
    } else {
        MatchedRule::DeniedNoMatch
    };

    AccessExplanation {
        component,
        user_type,
        admin_type,
        granted: rule != MatchedRule::DeniedNoMatch,
        rule,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_admin_override_is_absolute() {
        for user_type in UserType::ALL {
            for component in ComponentId::ALL {
                assert!(
                    can_access_component(user_type, *component, Some(AdminType::SystemAdmin)),
                    "{user_type} denied {component} despite SYSTEM_ADMIN"
                );
            }
        }
    }

    #[test]
    fn plain_user_type_is_limited_to_its_table() {
        for user_type in UserType::ALL {
            let allowed = components_for_user_type(user_type);
            for component in ComponentId::ALL {
                assert_eq!(
                    can_access_component(user_type, *component, None),
                    allowed.contains(component),
                    "{user_type} / {component}"
                );
            }
        }
    }

    #[test]
    fn bonus_widens_without_shrinking() {
        for subtype in [
            AdminType::InsuranceAdmin,
            AdminType::ProviderAdmin,
            AdminType::CorporateAdmin,
        ] {
            for user_type in UserType::ALL {
                for component in ComponentId::ALL {
                    let plain = can_access_component(user_type, *component, None);
                    let with_subtype = can_access_component(user_type, *component, Some(subtype));
                    if plain {
                        assert!(with_subtype, "{subtype} shrank {user_type}/{component}");
                    }
                    let expected_extra = admin_type_bonus(subtype).contains(component);
                    assert_eq!(with_subtype, plain || expected_extra);
                }
            }
        }
    }

    #[test]
    fn corporate_admin_bonus_example() {
        // corporate.admin.dashboard is already in the corporate admin table;
        // the bonus matters for user types that lack it.
        assert!(!can_access_component(UserType::Staff, ComponentId::CorporateAdminDashboard, None));
        assert!(can_access_component(
            UserType::Staff,
            ComponentId::CorporateAdminDashboard,
            Some(AdminType::CorporateAdmin)
        ));
    }

    #[test]
    fn bridge_covers_only_user_and_insurance_records() {
        assert!(can_access_component_by_permission(
            Resource::Users,
            Action::Read,
            ComponentId::UserList
        ));
        assert!(can_access_component_by_permission(
            Resource::InsuranceCompanies,
            Action::Update,
            ComponentId::InsuranceEdit
        ));
        assert!(!can_access_component_by_permission(
            Resource::Users,
            Action::Read,
            ComponentId::UserCreate
        ));
        assert!(!can_access_component_by_permission(
            Resource::Claims,
            Action::Read,
            ComponentId::ClaimList
        ));
        // The bridge does not expand manage.
        assert!(!can_access_component_by_permission(
            Resource::Users,
            Action::Manage,
            ComponentId::UserList
        ));
        assert!(components_for_resource_action(Resource::Policies, Action::Read).is_empty());
    }

    #[test]
    fn explanation_names_the_firing_rule() {
        let e = explain_component_access(
            UserType::Member,
            ComponentId::AdminList,
            Some(AdminType::SystemAdmin),
        );
        assert!(e.granted);
        assert_eq!(e.rule, MatchedRule::SystemAdminOverride);

        let e = explain_component_access(UserType::Member, ComponentId::MemberDashboard, None);
        assert!(e.granted);
        assert_eq!(e.rule, MatchedRule::UserTypeTable);

        let e = explain_component_access(
            UserType::Staff,
            ComponentId::SidebarMembers,
            Some(AdminType::CorporateAdmin),
        );
        assert!(e.granted);
        assert_eq!(e.rule, MatchedRule::AdminTypeBonus);

        let e = explain_component_access(UserType::Member, ComponentId::AdminList, None);
        assert!(!e.granted);
        assert_eq!(e.rule, MatchedRule::DeniedNoMatch);
    }

    #[test]
    fn explanation_serializes_for_audit_logs() {
        let e = explain_component_access(UserType::Member, ComponentId::AdminList, None);
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["granted"], false);
        assert_eq!(json["rule"], "denied_no_match");
        assert_eq!(json["component"], "admin.list");
        assert_eq!(json["user_type"], "member");
        assert!(json["admin_type"].is_null());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn user_types() -> impl Strategy<Value = UserType> {
            prop::sample::select(&UserType::ALL[..])
        }

        fn admin_types() -> impl Strategy<Value = Option<AdminType>> {
            proptest::option::of(prop::sample::select(&AdminType::ALL[..]))
        }

        fn components() -> impl Strategy<Value = ComponentId> {
            prop::sample::select(ComponentId::ALL)
        }

        proptest! {
            /// Property: the explanation always agrees with the decision.
            #[test]
            fn explanation_agrees_with_decision(
                user_type in user_types(),
                admin_type in admin_types(),
                component in components(),
            ) {
                let decided = can_access_component(user_type, component, admin_type);
                let explained = explain_component_access(user_type, component, admin_type);
                prop_assert_eq!(decided, explained.granted);
                prop_assert_eq!(explained.rule == MatchedRule::DeniedNoMatch, !decided);
            }

            /// Property: arbitrary strings either name a cataloged component
            /// or fail to parse; lookups never panic.
            #[test]
            fn unknown_codes_fail_closed(code in "\\PC{0,40}") {
                match code.parse::<ComponentId>() {
                    Ok(component) => prop_assert_eq!(component.as_str(), code.as_str()),
                    Err(_) => prop_assert!(!ComponentId::ALL.iter().any(|c| c.as_str() == code)),
                }
            }
        }
    }
}
