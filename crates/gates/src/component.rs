//! Capability gate.

use coverdesk_core::SessionPrincipal;
use coverdesk_registry::{ComponentId, can_access_component};

/// Wraps a piece of UI content behind a capability check.
///
/// `render` re-evaluates on every call against the principal it is handed;
/// the gate caches nothing, so a user switch in the same mounted tree takes
/// effect immediately. An absent principal is a deny.
#[derive(Debug, Clone)]
pub struct ComponentGate<T> {
    component: ComponentId,
    children: T,
    fallback: Option<T>,
}

impl<T> ComponentGate<T> {
    pub fn new(component: ComponentId, children: T) -> Self {
        Self { component, children, fallback: None }
    }

    /// Content shown instead of the children when access is denied.
    pub fn with_fallback(mut self, fallback: T) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn component(&self) -> ComponentId {
        self.component
    }

    /// The children when the principal may use the component, otherwise the
    /// fallback if one was supplied, otherwise nothing.
    pub fn render(&self, user: Option<&SessionPrincipal>) -> Option<&T> {
        match user {
            Some(user)
                if can_access_component(user.user_type, self.component, user.admin_type) =>
            {
                Some(&self.children)
            }
            _ => self.fallback.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::Utc;
    use coverdesk_core::{AdminType, PrincipalId, UserType};

    use super::*;

    fn principal(user_type: UserType, admin_type: Option<AdminType>) -> SessionPrincipal {
        let now = Utc::now();
        SessionPrincipal {
            id: PrincipalId::new("u-1"),
            username: "casey".into(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            phone_number: String::new(),
            user_type,
            admin_type,
            is_active: true,
            last_login_at: None,
            insurance_company_id: None,
            corporate_client_id: None,
            created_at: now,
            updated_at: now,
            roles: Vec::new(),
            permissions: BTreeMap::new(),
        }
    }

    #[test]
    fn renders_children_for_an_allowed_principal() {
        let gate = ComponentGate::new(ComponentId::StaffDashboard, "widgets");
        let staff = principal(UserType::Staff, None);
        assert_eq!(gate.render(Some(&staff)), Some(&"widgets"));
    }

    #[test]
    fn denied_principal_sees_the_fallback() {
        let gate = ComponentGate::new(ComponentId::AdminCreate, "editor").with_fallback("locked");
        let member = principal(UserType::Member, None);
        assert_eq!(gate.render(Some(&member)), Some(&"locked"));

        let bare = ComponentGate::new(ComponentId::AdminCreate, "editor");
        assert_eq!(bare.render(Some(&member)), None);
    }

    #[test]
    fn system_admin_override_opens_every_gate() {
        let root = principal(UserType::Admin, Some(AdminType::SystemAdmin));
        for component in ComponentId::ALL {
            let gate = ComponentGate::new(*component, ());
            assert_eq!(gate.render(Some(&root)), Some(&()));
        }
    }

    #[test]
    fn absent_user_is_denied_for_every_component() {
        for component in ComponentId::ALL {
            let silent = ComponentGate::new(*component, "content");
            assert_eq!(silent.render(None), None);

            let signposted = ComponentGate::new(*component, "content").with_fallback("sign in");
            assert_eq!(signposted.render(None), Some(&"sign in"));
        }
    }
}
