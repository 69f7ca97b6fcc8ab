//! Strongly-typed identifiers used across the domain.
//!
//! Backend-issued identifiers are opaque strings (the seed catalog uses
//! `"1"`..`"25"`, runtime-created records get UUIDv7 strings), so these
//! newtypes wrap `String` rather than `Uuid`.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of an authenticated principal (backend account id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(String);

/// Identifier of a role record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(String);

/// Identifier of a permission record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionId(String);

macro_rules! impl_string_id {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Wrap a known-good identifier (seed data, backend payloads).
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Generate a fresh identifier.
            ///
            /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in
            /// tests for determinism.
            pub fn generate() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if s.trim().is_empty() {
                    return Err(DomainError::invalid_id(concat!($name, ": empty")));
                }
                Ok(Self(s.to_owned()))
            }
        }
    };
}

impl_string_id!(PrincipalId, "PrincipalId");
impl_string_id!(RoleId, "RoleId");
impl_string_id!(PermissionId, "PermissionId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_empty_ids() {
        assert!("".parse::<RoleId>().is_err());
        assert!("  ".parse::<PrincipalId>().is_err());
        assert_eq!("7".parse::<PermissionId>().unwrap().as_str(), "7");
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(RoleId::generate(), RoleId::generate());
    }

    #[test]
    fn serde_is_transparent() {
        let id = RoleId::new("3");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"3\"");
        let back: RoleId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
