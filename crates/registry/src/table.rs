//! Static capability tables.
//!
//! Two declarative tables drive every component access decision: the
//! per-user-type allow list and the per-admin-subtype bonus list. Both are
//! data, not logic; the decision function in [`crate::access`] is the only
//! place they are combined.

use coverdesk_core::{AdminType, UserType};

use crate::component::ComponentId;

/// Components a user type may access, before any admin-subtype widening.
///
/// The table is exhaustive over [`UserType`]; membership is the entire
/// decision for accounts without an admin subtype.
pub fn components_for_user_type(user_type: UserType) -> &'static [ComponentId] {
    use ComponentId::*;

    match user_type {
        UserType::Admin => &[
            Login,
            Header,
            Dashboard,
            InsuranceList,
            InsuranceCreate,
            InsuranceEdit,
            InsuranceDelete,
            AdminList,
            AdminCreate,
            AdminEdit,
            AdminDelete,
            UserList,
            UserCreate,
            UserEdit,
            UserDelete,
            PermissionView,
            PermissionEdit,
            ProfileView,
            ProfileEdit,
            SettingsView,
            SettingsEdit,
            SidebarDashboard,
            SidebarInsuranceCompanies,
            SidebarCreateInsurance,
            SidebarAdmins,
            SidebarProfile,
            SidebarSettings,
        ],
        UserType::InsuranceAdmin => &[
            Login,
            Header,
            InsuranceAdminDashboard,
            UserList,
            UserCreate,
            UserEdit,
            UserDelete,
            PolicyList,
            PolicyCreate,
            PolicyEdit,
            PolicyDelete,
            ClaimList,
            ClaimEdit,
            ClaimApprove,
            ClaimReject,
            CoverageList,
            CoverageCreate,
            CoverageEdit,
            CoverageDelete,
            ProviderList,
            ProviderCreate,
            ProviderEdit,
            ProviderDelete,
            ProviderAdminList,
            ProviderAdminCreate,
            ProviderAdminEdit,
            ProviderAdminDelete,
            ProviderAdminPermission,
            CorporateList,
            CorporateCreate,
            CorporateEdit,
            CorporateDelete,
            CorporateAdminList,
            CorporateAdminCreate,
            CorporateAdminEdit,
            CorporateAdminDelete,
            CorporateAdminPermission,
            StaffList,
            StaffCreate,
            StaffEdit,
            StaffDelete,
            StaffPermission,
            MemberList,
            MemberCreate,
            MemberEdit,
            MemberDelete,
            ProfileView,
            ProfileEdit,
            SettingsView,
            SettingsEdit,
            SidebarDashboard,
            SidebarProviders,
            SidebarProvidersAdmin,
            SidebarCorporate,
            SidebarCorporateAdmin,
            SidebarStaff,
            SidebarMembers,
            SidebarProfile,
            SidebarSettings,
        ],
        UserType::InsuranceStaff => &[
            Login,
            Header,
            StaffDashboard,
            PolicyList,
            ClaimList,
            ClaimEdit,
            ProfileView,
            ProfileEdit,
            SidebarDashboard,
            SidebarProfile,
        ],
        UserType::CorporateAdmin => &[
            Login,
            Header,
            CorporateAdminDashboard,
            CorporateList,
            CorporateEdit,
            CoverageList,
            MemberList,
            MemberCreate,
            MemberEdit,
            MemberDelete,
            StaffList,
            ProfileView,
            ProfileEdit,
            SettingsView,
            SidebarDashboard,
            SidebarStaff,
            SidebarMembers,
            SidebarProfile,
            SidebarSettings,
        ],
        UserType::ProviderAdmin => &[
            Login,
            Header,
            ProviderAdminDashboard,
            ClaimList,
            ClaimCreate,
            ClaimEdit,
            ProfileView,
            ProfileEdit,
            SidebarDashboard,
            SidebarProfile,
            SidebarSettings,
            SettingsView,
            SidebarStaff,
            StaffList,
            SidebarMembers,
            ProviderMemberList,
            ProviderMemberCreate,
            ProviderMemberEdit,
            ProviderMemberDelete,
        ],
        UserType::Staff => &[
            Login,
            Header,
            StaffDashboard,
            ProfileView,
            ProfileEdit,
            InsuranceList,
            SidebarDashboard,
            SidebarProfile,
        ],
        UserType::Member => &[
            Login,
            Header,
            MemberDashboard,
            PolicyList,
            ClaimList,
            ClaimCreate,
            ProfileView,
            ProfileEdit,
            CoverageList,
            SidebarDashboard,
            SidebarProfile,
        ],
        UserType::Provider => &[
            Login,
            Header,
            ProviderAdminDashboard,
            ClaimList,
            ClaimCreate,
            ProfileView,
            ProfileEdit,
            CoverageList,
            SidebarDashboard,
            SidebarProviders,
            SidebarProfile,
        ],
    }
}

/// Extra components an admin subtype grants on top of the user-type list.
///
/// `SystemAdmin` returns the empty slice: its unconditional override lives
/// in the decision function, not in table data.
pub fn admin_type_bonus(admin_type: AdminType) -> &'static [ComponentId] {
    use ComponentId::*;

    match admin_type {
        AdminType::SystemAdmin => &[],
        AdminType::InsuranceAdmin => &[SidebarProviders, SidebarCorporate, SidebarStaff, SidebarMembers],
        AdminType::ProviderAdmin => &[SidebarStaff, SidebarMembers, ProviderAdminDashboard],
        AdminType::CorporateAdmin => &[SidebarMembers, CorporateAdminDashboard],
    }
}
