//! Closed enumerations of the authorization vocabulary.
//!
//! The backend speaks in strings; these enums are the only place those
//! strings are interpreted. Parsing is case-insensitive and happens once,
//! at the ingest boundary. Past that boundary only enum values circulate,
//! so decision code cannot be handed a typo'd category.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

// ─────────────────────────────────────────────────────────────────────────────
// User type
// ─────────────────────────────────────────────────────────────────────────────

/// Coarse account category. Every authenticated principal carries exactly
/// one, fixed for the lifetime of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Admin,
    InsuranceAdmin,
    InsuranceStaff,
    CorporateAdmin,
    ProviderAdmin,
    Staff,
    Member,
    Provider,
}

impl UserType {
    pub const ALL: [UserType; 8] = [
        UserType::Admin,
        UserType::InsuranceAdmin,
        UserType::InsuranceStaff,
        UserType::CorporateAdmin,
        UserType::ProviderAdmin,
        UserType::Staff,
        UserType::Member,
        UserType::Provider,
    ];

    /// Canonical wire form (lower snake case).
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Admin => "admin",
            UserType::InsuranceAdmin => "insurance_admin",
            UserType::InsuranceStaff => "insurance_staff",
            UserType::CorporateAdmin => "corporate_admin",
            UserType::ProviderAdmin => "provider_admin",
            UserType::Staff => "staff",
            UserType::Member => "member",
            UserType::Provider => "provider",
        }
    }
}

impl core::fmt::Display for UserType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|t| s.eq_ignore_ascii_case(t.as_str()))
            .copied()
            .ok_or_else(|| DomainError::validation(format!("unknown user type: {s:?}")))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Admin type
// ─────────────────────────────────────────────────────────────────────────────

/// Administrative subtype carried alongside admin-grade accounts.
///
/// `SystemAdmin` is the absolute override: component access checks grant
/// it everything regardless of user type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdminType {
    SystemAdmin,
    InsuranceAdmin,
    ProviderAdmin,
    CorporateAdmin,
}

impl AdminType {
    pub const ALL: [AdminType; 4] = [
        AdminType::SystemAdmin,
        AdminType::InsuranceAdmin,
        AdminType::ProviderAdmin,
        AdminType::CorporateAdmin,
    ];

    /// Canonical wire form (upper snake case, per the backend contract).
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminType::SystemAdmin => "SYSTEM_ADMIN",
            AdminType::InsuranceAdmin => "INSURANCE_ADMIN",
            AdminType::ProviderAdmin => "PROVIDER_ADMIN",
            AdminType::CorporateAdmin => "CORPORATE_ADMIN",
        }
    }
}

impl core::fmt::Display for AdminType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|t| s.eq_ignore_ascii_case(t.as_str()))
            .copied()
            .ok_or_else(|| DomainError::validation(format!("unknown admin type: {s:?}")))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Resource / Action
// ─────────────────────────────────────────────────────────────────────────────

/// Protected resource category a permission applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Users,
    Roles,
    InsuranceCompanies,
    Policies,
    Claims,
    Settings,
    Dashboard,
    Profile,
    CorporateClients,
    CoveragePlans,
}

impl Resource {
    pub const ALL: [Resource; 10] = [
        Resource::Users,
        Resource::Roles,
        Resource::InsuranceCompanies,
        Resource::Policies,
        Resource::Claims,
        Resource::Settings,
        Resource::Dashboard,
        Resource::Profile,
        Resource::CorporateClients,
        Resource::CoveragePlans,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Users => "users",
            Resource::Roles => "roles",
            Resource::InsuranceCompanies => "insurance_companies",
            Resource::Policies => "policies",
            Resource::Claims => "claims",
            Resource::Settings => "settings",
            Resource::Dashboard => "dashboard",
            Resource::Profile => "profile",
            Resource::CorporateClients => "corporate_clients",
            Resource::CoveragePlans => "coverage_plans",
        }
    }
}

impl core::fmt::Display for Resource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|r| s.eq_ignore_ascii_case(r.as_str()))
            .copied()
            .ok_or_else(|| DomainError::validation(format!("unknown resource: {s:?}")))
    }
}

/// Operation a permission grants on its resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    /// Grants every other action on the same resource.
    Manage,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Create,
        Action::Read,
        Action::Update,
        Action::Delete,
        Action::Manage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Manage => "manage",
        }
    }

    /// Whether a held action satisfies a required one.
    ///
    /// `Manage` satisfies any requirement on the same resource; every other
    /// action only satisfies itself.
    pub fn satisfies(&self, required: Action) -> bool {
        *self == Action::Manage || *self == required
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|a| s.eq_ignore_ascii_case(a.as_str()))
            .copied()
            .ok_or_else(|| DomainError::validation(format!("unknown action: {s:?}")))
    }
}
