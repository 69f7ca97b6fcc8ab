//! Seed permission and role catalog.
//!
//! The backend provisions tenants from this same catalog, so ids are stable
//! small integers and must not be renumbered.

use crate::permission::Permission;
use crate::role::Role;
use crate::types::{Action, Resource};

fn perm(id: &str, name: &str, description: &str, resource: Resource, action: Action) -> Permission {
    Permission::new(id, name, description, resource, action)
}

/// The fixed permission catalog every deployment starts from.
pub fn default_permissions() -> Vec<Permission> {
    vec![
        perm("1", "Read Users", "Can view users", Resource::Users, Action::Read),
        perm("2", "Create Users", "Can create users", Resource::Users, Action::Create),
        perm("3", "Update Users", "Can update users", Resource::Users, Action::Update),
        perm("4", "Delete Users", "Can delete users", Resource::Users, Action::Delete),
        perm("5", "Read Roles", "Can view roles", Resource::Roles, Action::Read),
        perm("6", "Create Roles", "Can create roles", Resource::Roles, Action::Create),
        perm("7", "Update Roles", "Can update roles", Resource::Roles, Action::Update),
        perm("8", "Delete Roles", "Can delete roles", Resource::Roles, Action::Delete),
        perm(
            "9",
            "Read Companies",
            "Can view insurance companies",
            Resource::InsuranceCompanies,
            Action::Read,
        ),
        perm(
            "10",
            "Create Companies",
            "Can create insurance companies",
            Resource::InsuranceCompanies,
            Action::Create,
        ),
        perm(
            "11",
            "Update Companies",
            "Can update insurance companies",
            Resource::InsuranceCompanies,
            Action::Update,
        ),
        perm(
            "12",
            "Delete Companies",
            "Can delete insurance companies",
            Resource::InsuranceCompanies,
            Action::Delete,
        ),
        perm("13", "Access Dashboard", "Can access dashboard", Resource::Dashboard, Action::Read),
        perm("14", "Read Settings", "Can view settings", Resource::Settings, Action::Read),
        perm("15", "Update Settings", "Can update settings", Resource::Settings, Action::Update),
        perm("16", "Read Profile", "Can view own profile", Resource::Profile, Action::Read),
        perm("17", "Update Profile", "Can update own profile", Resource::Profile, Action::Update),
        perm(
            "18",
            "Create Corporate Clients",
            "Can create corporate clients",
            Resource::CorporateClients,
            Action::Create,
        ),
        perm(
            "19",
            "Read Corporate Clients",
            "Can view corporate clients",
            Resource::CorporateClients,
            Action::Read,
        ),
        perm(
            "20",
            "Update Corporate Clients",
            "Can update corporate clients",
            Resource::CorporateClients,
            Action::Update,
        ),
        perm(
            "21",
            "Delete Corporate Clients",
            "Can delete corporate clients",
            Resource::CorporateClients,
            Action::Delete,
        ),
        perm(
            "22",
            "Create Coverage Plans",
            "Can create coverage plans",
            Resource::CoveragePlans,
            Action::Create,
        ),
        perm(
            "23",
            "Read Coverage Plans",
            "Can view coverage plans",
            Resource::CoveragePlans,
            Action::Read,
        ),
        perm(
            "24",
            "Update Coverage Plans",
            "Can update coverage plans",
            Resource::CoveragePlans,
            Action::Update,
        ),
        perm(
            "25",
            "Delete Coverage Plans",
            "Can delete coverage plans",
            Resource::CoveragePlans,
            Action::Delete,
        ),
    ]
}

/// The five pre-populated roles, each a filtered view of the catalog.
pub fn default_roles() -> Vec<Role> {
    let catalog = default_permissions();
    let filtered = |keep: &dyn Fn(&Permission) -> bool| -> Vec<Permission> {
        catalog.iter().filter(|p| keep(p)).cloned().collect()
    };

    vec![
        Role::new(
            "1",
            "ADMIN",
            "System administrator with full access",
            catalog.clone(),
        ),
        Role::new(
            "2",
            "STAFF",
            "General staff member with limited permissions",
            filtered(&|p| {
                matches!(p.resource, Resource::Dashboard | Resource::Profile)
                    || (p.resource == Resource::InsuranceCompanies && p.action == Action::Read)
            }),
        ),
        Role::new(
            "3",
            "CORPORATE",
            "Corporate client manager",
            filtered(&|p| {
                matches!(
                    p.resource,
                    Resource::Dashboard
                        | Resource::Profile
                        | Resource::CorporateClients
                        | Resource::CoveragePlans
                )
            }),
        ),
        Role::new(
            "4",
            "MEMBER",
            "Insurance member with access to own information",
            filtered(&|p| {
                p.resource == Resource::Profile
                    || (p.resource == Resource::CoveragePlans && p.action == Action::Read)
            }),
        ),
        Role::new(
            "5",
            "PROVIDER",
            "Healthcare provider",
            filtered(&|p| {
                matches!(p.resource, Resource::Profile | Resource::Dashboard)
                    || (p.resource == Resource::CoveragePlans && p.action == Action::Read)
            }),
        ),
    ]
}
