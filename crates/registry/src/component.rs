//! The component catalog.
//!
//! Every gate-able UI capability has exactly one entry here, identified by
//! the dotted code the console and backend share (`users.list`,
//! `insurance.admin.dashboard`, ...). The enum is closed: a component that
//! is not declared cannot be asked about, and asking about a declared one
//! never fails. Codes are matched exactly; they are protocol tokens, not
//! user input.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use coverdesk_core::DomainError;

macro_rules! component_catalog {
    ($($variant:ident => $code:literal),+ $(,)?) => {
        /// Identifier of a gate-able UI capability.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ComponentId {
            $($variant),+
        }

        impl ComponentId {
            /// Every declared component, in catalog order.
            pub const ALL: &'static [ComponentId] = &[$(ComponentId::$variant),+];

            /// The dotted wire code of this component.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(ComponentId::$variant => $code),+
                }
            }
        }

        impl FromStr for ComponentId {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($code => Ok(ComponentId::$variant),)+
                    _ => Err(DomainError::validation(format!("unknown component: {s:?}"))),
                }
            }
        }
    };
}

component_catalog! {
    // Common
    Login => "com.login",
    Header => "com.header",
    Dashboard => "com.dashboard",

    // User management
    UserList => "users.list",
    UserCreate => "users.create",
    UserEdit => "users.edit",
    UserDelete => "users.delete",

    // Insurance companies
    InsuranceList => "insurance.list",
    InsuranceCreate => "insurance.create",
    InsuranceEdit => "insurance.edit",
    InsuranceDelete => "insurance.delete",
    InsuranceAdminDashboard => "insurance.admin.dashboard",

    // Policies
    PolicyList => "policy.list",
    PolicyCreate => "policy.create",
    PolicyEdit => "policy.edit",
    PolicyDelete => "policy.delete",

    // Claims
    ClaimList => "claim.list",
    ClaimCreate => "claim.create",
    ClaimEdit => "claim.edit",
    ClaimApprove => "claim.approve",
    ClaimReject => "claim.reject",

    // Corporate clients
    CorporateList => "corporate.list",
    CorporateCreate => "corporate.create",
    CorporateEdit => "corporate.edit",
    CorporateDelete => "corporate.delete",
    CorporateAdminDashboard => "corporate.admin.dashboard",

    // Coverage plans
    CoverageList => "coverage.list",
    CoverageCreate => "coverage.create",
    CoverageEdit => "coverage.edit",
    CoverageDelete => "coverage.delete",

    // Profile
    ProfileView => "profile.view",
    ProfileEdit => "profile.edit",

    // Settings
    SettingsView => "settings.view",
    SettingsEdit => "settings.edit",

    // Admin management
    AdminList => "admin.list",
    AdminCreate => "admin.create",
    AdminEdit => "admin.edit",
    AdminDelete => "admin.delete",

    // Permission management
    PermissionView => "permission-view",
    PermissionEdit => "permission-edit",

    // Base sidebar
    SidebarDashboard => "sidebar.dashboard",
    SidebarInsuranceCompanies => "sidebar.insurance_companies",
    SidebarCreateInsurance => "sidebar.create_insurance",
    SidebarAdmins => "sidebar.admins",
    SidebarProfile => "sidebar.profile",
    SidebarSettings => "sidebar.settings",

    // Provider management
    ProviderList => "provider.list",
    ProviderCreate => "provider.create",
    ProviderEdit => "provider.edit",
    ProviderDelete => "provider.delete",
    ProviderAdminDashboard => "provider.admin.dashboard",
    ProviderAdminList => "provider.admin.list",
    ProviderAdminCreate => "provider.admin.create",
    ProviderAdminEdit => "provider.admin.edit",
    ProviderAdminDelete => "provider.admin.delete",
    ProviderAdminPermission => "provider.admin.permission",

    // Corporate admin management
    CorporateAdminList => "corporate.admin.list",
    CorporateAdminCreate => "corporate.admin.create",
    CorporateAdminEdit => "corporate.admin.edit",
    CorporateAdminDelete => "corporate.admin.delete",
    CorporateAdminPermission => "corporate.admin.permission",

    // Staff management
    StaffList => "staff.list",
    StaffCreate => "staff.create",
    StaffEdit => "staff.edit",
    StaffDelete => "staff.delete",
    StaffPermission => "staff.permission",
    StaffDashboard => "staff.dashboard",

    // Member management
    MemberList => "member.list",
    MemberCreate => "member.create",
    MemberEdit => "member.edit",
    MemberDelete => "member.delete",
    MemberDashboard => "member.dashboard",

    // Provider member management
    ProviderMemberList => "provider.member.list",
    ProviderMemberCreate => "provider.member.create",
    ProviderMemberEdit => "provider.member.edit",
    ProviderMemberDelete => "provider.member.delete",

    // Insurance-admin sidebar sections
    SidebarProviders => "sidebar.providers",
    SidebarProvidersAdmin => "sidebar.providers.admin",
    SidebarCorporate => "sidebar.corporate",
    SidebarCorporateAdmin => "sidebar.corporate.admin",
    SidebarStaff => "sidebar.staff",
    SidebarMembers => "sidebar.members",

    // Admin permission screens
    InsuranceAdminPermissions => "insurance-admin-permissions",
    CorporateAdminPermissions => "corporate-admin-permissions",
    ProviderAdminPermissions => "provider-admin-permissions",
}

impl core::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ComponentId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ComponentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn catalog_codes_are_unique() {
        let codes: HashSet<&str> = ComponentId::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(codes.len(), ComponentId::ALL.len());
    }

    #[test]
    fn every_code_parses_back_to_its_component() {
        for component in ComponentId::ALL {
            assert_eq!(component.as_str().parse::<ComponentId>().unwrap(), *component);
        }
    }

    #[test]
    fn codes_are_matched_exactly() {
        assert!("USERS.LIST".parse::<ComponentId>().is_err());
        assert!("users.export".parse::<ComponentId>().is_err());
        assert!("".parse::<ComponentId>().is_err());
        assert_eq!(
            "insurance-admin-permissions".parse::<ComponentId>().unwrap(),
            ComponentId::InsuranceAdminPermissions
        );
    }

    #[test]
    fn serde_uses_wire_codes() {
        let json = serde_json::to_string(&ComponentId::SidebarInsuranceCompanies).unwrap();
        assert_eq!(json, "\"sidebar.insurance_companies\"");
        let back: ComponentId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ComponentId::SidebarInsuranceCompanies);
        assert!(serde_json::from_str::<ComponentId>("\"not.a.component\"").is_err());
    }
}
