//! Permission, role and user-type gates.
//!
//! Same contract as the capability gate: pure lookups against the principal
//! handed to `render`, no caching, absent principal means deny.

use coverdesk_core::{Action, Resource, SessionPrincipal, UserType};

/// Gates content behind a `(resource, action)` permission.
#[derive(Debug, Clone)]
pub struct PermissionGate<T> {
    resource: Resource,
    action: Action,
    children: T,
    fallback: Option<T>,
}

impl<T> PermissionGate<T> {
    pub fn new(resource: Resource, action: Action, children: T) -> Self {
        Self { resource, action, children, fallback: None }
    }

    pub fn with_fallback(mut self, fallback: T) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn render(&self, user: Option<&SessionPrincipal>) -> Option<&T> {
        match user {
            Some(user) if user.has_permission(self.resource, self.action) => {
                Some(&self.children)
            }
            _ => self.fallback.as_ref(),
        }
    }
}

/// Gates content behind held role names.
///
/// Any-of by default; `require_all(true)` demands every listed name. Names
/// compare ASCII case-insensitively, like role lookups everywhere else.
#[derive(Debug, Clone)]
pub struct RoleGate<T> {
    roles: Vec<String>,
    require_all: bool,
    children: T,
    fallback: Option<T>,
}

impl<T> RoleGate<T> {
    pub fn new<I, S>(roles: I, children: T) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            roles: roles.into_iter().map(Into::into).collect(),
            require_all: false,
            children,
            fallback: None,
        }
    }

    pub fn require_all(mut self, require_all: bool) -> Self {
        self.require_all = require_all;
        self
    }

    pub fn with_fallback(mut self, fallback: T) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn render(&self, user: Option<&SessionPrincipal>) -> Option<&T> {
        let Some(user) = user else {
            return self.fallback.as_ref();
        };
        let authorized = if self.require_all {
            self.roles.iter().all(|role| user.has_role(role))
        } else {
            self.roles.iter().any(|role| user.has_role(role))
        };
        if authorized { Some(&self.children) } else { self.fallback.as_ref() }
    }
}

/// Gates content behind the account's user type.
#[derive(Debug, Clone)]
pub struct UserTypeGate<T> {
    user_types: Vec<UserType>,
    require_all: bool,
    children: T,
    fallback: Option<T>,
}

impl<T> UserTypeGate<T> {
    pub fn new(user_types: Vec<UserType>, children: T) -> Self {
        Self { user_types, require_all: false, children, fallback: None }
    }

    /// An account holds exactly one user type, so all-of only ever passes
    /// for a single-entry list. Kept for API symmetry with [`RoleGate`].
    pub fn require_all(mut self, require_all: bool) -> Self {
        self.require_all = require_all;
        self
    }

    pub fn with_fallback(mut self, fallback: T) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn render(&self, user: Option<&SessionPrincipal>) -> Option<&T> {
        let Some(user) = user else {
            return self.fallback.as_ref();
        };
        let authorized = if self.require_all {
            self.user_types.iter().all(|t| user.has_user_type(*t))
        } else {
            self.user_types.iter().any(|t| user.has_user_type(*t))
        };
        if authorized { Some(&self.children) } else { self.fallback.as_ref() }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::Utc;
    use coverdesk_core::{Permission, PrincipalId, Role};

    use super::*;

    fn principal(user_type: UserType, roles: Vec<Role>) -> SessionPrincipal {
        let now = Utc::now();
        SessionPrincipal {
            id: PrincipalId::new("u-1"),
            username: "casey".into(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            phone_number: String::new(),
            user_type,
            admin_type: None,
            is_active: true,
            last_login_at: None,
            insurance_company_id: None,
            corporate_client_id: None,
            created_at: now,
            updated_at: now,
            roles,
            permissions: BTreeMap::new(),
        }
    }

    fn claims_manager() -> Role {
        Role::new(
            "30",
            "CLAIMS_MANAGER",
            "Handles claims",
            vec![Permission::new("p-30", "Manage Claims", "", Resource::Claims, Action::Manage)],
        )
    }

    #[test]
    fn permission_gate_honors_manage_subsumption() {
        let gate = PermissionGate::new(Resource::Claims, Action::Delete, "purge button");
        let handler = principal(UserType::Staff, vec![claims_manager()]);
        assert_eq!(gate.render(Some(&handler)), Some(&"purge button"));

        let bystander = principal(UserType::Staff, vec![]);
        assert_eq!(gate.render(Some(&bystander)), None);
        assert_eq!(gate.render(None), None);
    }

    #[test]
    fn role_gate_any_of_matches_case_insensitively() {
        let gate = RoleGate::new(["admin", "claims_manager"], "toolbar");
        let handler = principal(UserType::Staff, vec![claims_manager()]);
        assert_eq!(gate.render(Some(&handler)), Some(&"toolbar"));

        let outsider = principal(UserType::Staff, vec![]);
        assert_eq!(gate.render(Some(&outsider)), None);
    }

    #[test]
    fn role_gate_all_of_requires_every_name() {
        let both = RoleGate::new(["CLAIMS_MANAGER", "ADMIN"], "toolbar").require_all(true);
        let handler = principal(UserType::Staff, vec![claims_manager()]);
        assert_eq!(both.render(Some(&handler)), None);

        let one = RoleGate::new(["CLAIMS_MANAGER"], "toolbar").require_all(true);
        assert_eq!(one.render(Some(&handler)), Some(&"toolbar"));
    }

    #[test]
    fn all_of_over_an_empty_list_is_vacuously_true() {
        let gate: RoleGate<&str> = RoleGate::new(Vec::<String>::new(), "open").require_all(true);
        let anyone = principal(UserType::Member, vec![]);
        assert_eq!(gate.render(Some(&anyone)), Some(&"open"));
        // Still nothing for the signed-out.
        assert_eq!(gate.render(None), None);
    }

    #[test]
    fn user_type_gate_matches_any_listed_type() {
        let gate = UserTypeGate::new(
            vec![UserType::Admin, UserType::InsuranceAdmin],
            "admin area",
        )
        .with_fallback("request access");

        let insurance = principal(UserType::InsuranceAdmin, vec![]);
        assert_eq!(gate.render(Some(&insurance)), Some(&"admin area"));

        let member = principal(UserType::Member, vec![]);
        assert_eq!(gate.render(Some(&member)), Some(&"request access"));
        assert_eq!(gate.render(None), Some(&"request access"));
    }

    #[test]
    fn fallback_is_shown_to_the_signed_out() {
        let gate = RoleGate::new(["ADMIN"], "controls").with_fallback("sign in first");
        assert_eq!(gate.render(None), Some(&"sign in first"));
    }
}
