//! Authenticated principal state.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::PrincipalId;
use crate::role::Role;
use crate::types::{Action, AdminType, Resource, UserType};

/// The authenticated user record a session holds between login and logout.
///
/// Field names follow the backend wire contract (camelCase JSON); the same
/// shape is persisted verbatim by the session store so a restored session
/// sees exactly what the live one saw.
///
/// # Invariants
/// - `user_type` is immutable for the lifetime of the session.
/// - `roles` never contains two entries with the same role id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPrincipal {
    pub id: PrincipalId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub user_type: UserType,
    #[serde(default)]
    pub admin_type: Option<AdminType>,
    pub is_active: bool,
    #[serde(default)]
    pub last_login_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub insurance_company_id: Option<String>,
    #[serde(default)]
    pub corporate_client_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub roles: Vec<Role>,
    /// Opaque feature flags forwarded by the backend (e.g. bootstrap grants
    /// for freshly provisioned insurance admins). Carried, not interpreted
    /// by the decision functions.
    #[serde(default)]
    pub permissions: BTreeMap<String, bool>,
}

impl SessionPrincipal {
    // ─────────────────────────────────────────────────────────────────────
    // Permission projection
    // ─────────────────────────────────────────────────────────────────────

    /// Whether any held role grants `action` on `resource`.
    ///
    /// A role permission matches when its resource equals the requirement
    /// and its action equals it or is `manage`.
    pub fn has_permission(&self, resource: Resource, action: Action) -> bool {
        self.roles.iter().any(|role| role.grants(resource, action))
    }

    /// Case-insensitive check for a held role name.
    pub fn has_role(&self, name: &str) -> bool {
        self.roles.iter().any(|role| role.is_named(name))
    }

    pub fn has_user_type(&self, user_type: UserType) -> bool {
        self.user_type == user_type
    }

    // ─────────────────────────────────────────────────────────────────────
    // Convenience categories
    // ─────────────────────────────────────────────────────────────────────
    //
    // Each category is the union of a role name and the user types that
    // imply it. They answer "what kind of account is this", not "what may
    // it do"; component access goes through the registry instead.

    pub fn is_admin(&self) -> bool {
        self.has_role("ADMIN")
            || matches!(self.user_type, UserType::Admin | UserType::InsuranceAdmin)
    }

    pub fn is_insurance_admin(&self) -> bool {
        self.user_type == UserType::InsuranceAdmin
            || self.admin_type == Some(AdminType::InsuranceAdmin)
    }

    pub fn is_corporate_admin(&self) -> bool {
        self.has_role("CORPORATE") || self.user_type == UserType::CorporateAdmin
    }

    pub fn is_provider(&self) -> bool {
        self.has_role("PROVIDER")
            || matches!(self.user_type, UserType::Provider | UserType::ProviderAdmin)
    }

    pub fn is_member(&self) -> bool {
        self.has_role("MEMBER") || self.user_type == UserType::Member
    }

    pub fn is_staff(&self) -> bool {
        self.has_role("STAFF")
            || matches!(self.user_type, UserType::Staff | UserType::InsuranceStaff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_roles;

    fn principal(user_type: UserType, admin_type: Option<AdminType>, roles: Vec<Role>) -> SessionPrincipal {
        let now = Utc::now();
        SessionPrincipal {
            id: PrincipalId::new("u-1"),
            username: "casey".into(),
            email: "casey@example.com".into(),
            first_name: "Casey".into(),
            last_name: "Nguyen".into(),
            phone_number: String::new(),
            user_type,
            admin_type,
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

    fn role_named(name: &str) -> Role {
        default_roles().into_iter().find(|r| r.is_named(name)).unwrap()
    }

    #[test]
    fn permission_check_spans_all_roles() {
        let p = principal(UserType::Staff, None, vec![role_named("STAFF"), role_named("MEMBER")]);
        assert!(p.has_permission(Resource::InsuranceCompanies, Action::Read));
        assert!(p.has_permission(Resource::CoveragePlans, Action::Read));
        assert!(!p.has_permission(Resource::Users, Action::Read));
    }

    #[test]
    fn manage_permission_satisfies_any_action() {
        let manage = Role::new(
            "90",
            "CLAIMS_MANAGER",
            "",
            vec![crate::permission::Permission::new(
                "p-90",
                "Manage Claims",
                "",
                Resource::Claims,
                Action::Manage,
            )],
        );
        let p = principal(UserType::Staff, None, vec![manage]);
        for action in Action::ALL {
            assert!(p.has_permission(Resource::Claims, action));
        }
        assert!(!p.has_permission(Resource::Policies, Action::Read));
    }

    #[test]
    fn admin_category_via_role_or_user_type() {
        assert!(principal(UserType::Member, None, vec![role_named("ADMIN")]).is_admin());
        assert!(principal(UserType::Admin, None, vec![]).is_admin());
        assert!(principal(UserType::InsuranceAdmin, None, vec![]).is_admin());
        assert!(!principal(UserType::Member, None, vec![role_named("MEMBER")]).is_admin());
    }

    #[test]
    fn insurance_admin_category_via_user_type_or_admin_type() {
        assert!(principal(UserType::InsuranceAdmin, None, vec![]).is_insurance_admin());
        assert!(
            principal(UserType::Admin, Some(AdminType::InsuranceAdmin), vec![])
                .is_insurance_admin()
        );
        assert!(!principal(UserType::Admin, Some(AdminType::SystemAdmin), vec![])
            .is_insurance_admin());
    }

    #[test]
    fn staff_and_provider_categories_cover_their_subtypes() {
        assert!(principal(UserType::InsuranceStaff, None, vec![]).is_staff());
        assert!(principal(UserType::Staff, None, vec![]).is_staff());
        assert!(principal(UserType::ProviderAdmin, None, vec![]).is_provider());
        assert!(principal(UserType::Provider, None, vec![]).is_provider());
        assert!(!principal(UserType::Member, None, vec![]).is_provider());
    }

    #[test]
    fn role_name_lookup_ignores_case() {
        let p = principal(UserType::Member, None, vec![role_named("MEMBER")]);
        assert!(p.has_role("member"));
        assert!(p.has_role("MEMBER"));
        assert!(!p.has_role("ADMIN"));
    }

    #[test]
    fn storage_round_trip_preserves_decision_inputs() {
        let p = principal(
            UserType::CorporateAdmin,
            Some(AdminType::CorporateAdmin),
            vec![role_named("CORPORATE")],
        );
        let json = serde_json::to_string(&p).unwrap();
        let back: SessionPrincipal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
        assert_eq!(
            back.has_permission(Resource::CorporateClients, Action::Update),
            p.has_permission(Resource::CorporateClients, Action::Update)
        );
        assert!(json.contains("\"userType\":\"corporate_admin\""));
        assert!(json.contains("\"adminType\":\"CORPORATE_ADMIN\""));
    }

    #[test]
    fn stored_record_without_optional_fields_still_decodes() {
        let json = r#"{
            "id": "u-9",
            "username": "lee",
            "email": "",
            "firstName": "",
            "lastName": "",
            "phoneNumber": "",
            "userType": "member",
            "isActive": true,
            "createdAt": "2026-01-05T08:00:00Z",
            "updatedAt": "2026-01-05T08:00:00Z"
        }"#;
        let p: SessionPrincipal = serde_json::from_str(json).unwrap();
        assert_eq!(p.user_type, UserType::Member);
        assert_eq!(p.admin_type, None);
        assert!(p.roles.is_empty());
        assert!(p.permissions.is_empty());
    }
}
