//! Boundary between raw backend payloads and the typed principal.
//!
//! Everything coming off the wire funnels through [`normalize_principal`]
//! before it can reach a decision function. User type is the one field
//! that must parse; everything else degrades to a documented default.

use std::collections::BTreeMap;

use chrono::Utc;
use serde_json::Value;
use thiserror::Error;

use coverdesk_core::{AdminType, PrincipalId, Role, SessionPrincipal, UserType};

use crate::client::RawUser;

/// Failure to derive a usable principal from a backend record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("user record has no user type")]
    MissingUserType,
    #[error("unknown user type: {0}")]
    UnknownUserType(String),
}

/// Flag keys seeded for insurance admins whose permission map arrives
/// empty (freshly provisioned accounts the backend has not flagged yet).
const INSURANCE_ADMIN_BOOTSTRAP: [&str; 3] =
    ["INSURANCE_ADMIN_DASHBOARD", "INSURANCE_LIST", "ADMIN_LIST"];

/// Convert an untrusted backend record into a [`SessionPrincipal`].
///
/// Fails only on a missing or unrecognized user type. Unknown admin types,
/// undecodable role entries and malformed flag values are dropped with a
/// warning rather than failing the whole record.
pub fn normalize_principal(raw: RawUser) -> Result<SessionPrincipal, NormalizeError> {
    let user_type = parse_user_type(raw.user_type.as_deref())?;
    let admin_type = parse_admin_type(raw.admin_type.as_deref());

    let mut permissions = flag_map(raw.permissions);
    if admin_type == Some(AdminType::InsuranceAdmin) && permissions.is_empty() {
        for key in INSURANCE_ADMIN_BOOTSTRAP {
            permissions.insert(key.to_owned(), true);
        }
    }

    let now = Utc::now();
    Ok(SessionPrincipal {
        id: PrincipalId::new(id_string(raw.id)),
        username: raw.username.unwrap_or_default(),
        email: raw.email.unwrap_or_default(),
        first_name: raw.first_name.unwrap_or_default(),
        last_name: raw.last_name.unwrap_or_default(),
        phone_number: raw.phone_number.unwrap_or_default(),
        user_type,
        admin_type,
        is_active: raw.is_active.unwrap_or(true),
        last_login_at: raw.last_login_at,
        insurance_company_id: raw.insurance_company_id,
        corporate_client_id: raw.corporate_client_id,
        created_at: raw.created_at.unwrap_or(now),
        updated_at: raw.updated_at.unwrap_or(now),
        roles: decode_roles(raw.roles),
        permissions,
    })
}

fn parse_user_type(raw: Option<&str>) -> Result<UserType, NormalizeError> {
    match raw.map(str::trim) {
        None | Some("") => Err(NormalizeError::MissingUserType),
        Some(s) => s.parse().map_err(|_| NormalizeError::UnknownUserType(s.to_owned())),
    }
}

fn parse_admin_type(raw: Option<&str>) -> Option<AdminType> {
    let s = raw?.trim();
    if s.is_empty() {
        return None;
    }
    match s.parse::<AdminType>() {
        Ok(admin_type) => Some(admin_type),
        Err(_) => {
            tracing::warn!(admin_type = %s, "ignoring unrecognized admin type");
            None
        }
    }
}

fn id_string(raw: Option<Value>) -> String {
    match raw {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => {
            tracing::warn!(id = %other, "ignoring unsupported id shape");
            String::new()
        }
        None => String::new(),
    }
}

fn decode_roles(raw: Vec<Value>) -> Vec<Role> {
    let mut roles: Vec<Role> = Vec::with_capacity(raw.len());
    for entry in raw {
        match serde_json::from_value::<Role>(entry) {
            Ok(role) => {
                if !roles.iter().any(|held| held.id == role.id) {
                    roles.push(role);
                }
            }
            Err(e) => tracing::warn!(error = %e, "dropping undecodable role entry"),
        }
    }
    roles
}

fn flag_map(raw: Option<Value>) -> BTreeMap<String, bool> {
    match raw {
        None | Some(Value::Null) => BTreeMap::new(),
        Some(Value::Object(entries)) => {
            let mut flags = BTreeMap::new();
            for (key, value) in entries {
                match value {
                    Value::Bool(flag) => {
                        flags.insert(key, flag);
                    }
                    other => {
                        tracing::warn!(key = %key, value = %other, "dropping non-boolean flag");
                    }
                }
            }
            flags
        }
        Some(other) => {
            tracing::warn!(value = %other, "permissions payload is not an object, ignoring");
            BTreeMap::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_from(value: Value) -> RawUser {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn user_type_is_required() {
        let err = normalize_principal(raw_from(json!({"username": "casey"}))).unwrap_err();
        assert_eq!(err, NormalizeError::MissingUserType);

        let err = normalize_principal(raw_from(json!({"userType": "  "}))).unwrap_err();
        assert_eq!(err, NormalizeError::MissingUserType);
    }

    #[test]
    fn unknown_user_type_fails_closed() {
        let err = normalize_principal(raw_from(json!({"userType": "wizard"}))).unwrap_err();
        assert_eq!(err, NormalizeError::UnknownUserType("wizard".into()));
    }

    #[test]
    fn user_type_parses_case_insensitively() {
        let p = normalize_principal(raw_from(json!({"userType": "INSURANCE_ADMIN"}))).unwrap();
        assert_eq!(p.user_type, UserType::InsuranceAdmin);

        let p = normalize_principal(raw_from(json!({"userType": "Admin"}))).unwrap();
        assert_eq!(p.user_type, UserType::Admin);
    }

    #[test]
    fn unknown_admin_type_degrades_to_none() {
        let p = normalize_principal(
            raw_from(json!({"userType": "admin", "adminType": "OVERLORD"})),
        )
        .unwrap();
        assert_eq!(p.admin_type, None);

        let p = normalize_principal(raw_from(json!({"userType": "admin", "adminType": ""})))
            .unwrap();
        assert_eq!(p.admin_type, None);

        let p = normalize_principal(
            raw_from(json!({"userType": "admin", "adminType": "system_admin"})),
        )
        .unwrap();
        assert_eq!(p.admin_type, Some(AdminType::SystemAdmin));
    }

    #[test]
    fn sparse_records_get_documented_defaults() {
        let p = normalize_principal(raw_from(json!({"userType": "member"}))).unwrap();
        assert_eq!(p.id.as_str(), "");
        assert_eq!(p.username, "");
        assert!(p.is_active);
        assert!(p.roles.is_empty());
        assert!(p.permissions.is_empty());
    }

    #[test]
    fn numeric_ids_become_strings() {
        let p = normalize_principal(raw_from(json!({"id": 42, "userType": "member"}))).unwrap();
        assert_eq!(p.id.as_str(), "42");
    }

    #[test]
    fn insurance_admin_bootstrap_fills_an_empty_flag_map() {
        let p = normalize_principal(
            raw_from(json!({"userType": "admin", "adminType": "INSURANCE_ADMIN"})),
        )
        .unwrap();
        assert_eq!(p.permissions.get("INSURANCE_ADMIN_DASHBOARD"), Some(&true));
        assert_eq!(p.permissions.get("INSURANCE_LIST"), Some(&true));
        assert_eq!(p.permissions.get("ADMIN_LIST"), Some(&true));
        assert_eq!(p.permissions.len(), 3);
    }

    #[test]
    fn bootstrap_never_overwrites_existing_flags() {
        let p = normalize_principal(raw_from(json!({
            "userType": "admin",
            "adminType": "INSURANCE_ADMIN",
            "permissions": {"ADMIN_LIST": false}
        })))
        .unwrap();
        assert_eq!(p.permissions.get("ADMIN_LIST"), Some(&false));
        assert_eq!(p.permissions.len(), 1);
    }

    #[test]
    fn bootstrap_is_scoped_to_insurance_admins() {
        let p = normalize_principal(
            raw_from(json!({"userType": "admin", "adminType": "SYSTEM_ADMIN"})),
        )
        .unwrap();
        assert!(p.permissions.is_empty());
    }

    #[test]
    fn undecodable_role_entries_are_dropped_not_fatal() {
        let p = normalize_principal(raw_from(json!({
            "userType": "staff",
            "roles": [
                {"id": "2", "name": "STAFF"},
                {"name": "missing-id"},
                "not even an object"
            ]
        })))
        .unwrap();
        assert_eq!(p.roles.len(), 1);
        assert_eq!(p.roles[0].name, "STAFF");
    }

    #[test]
    fn duplicate_role_ids_are_collapsed() {
        let p = normalize_principal(raw_from(json!({
            "userType": "staff",
            "roles": [
                {"id": "2", "name": "STAFF"},
                {"id": "2", "name": "STAFF"},
                {"id": "4", "name": "MEMBER"}
            ]
        })))
        .unwrap();
        let ids: Vec<&str> = p.roles.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["2", "4"]);
    }

    #[test]
    fn flag_map_keeps_only_booleans() {
        let p = normalize_principal(raw_from(json!({
            "userType": "member",
            "permissions": {"A": true, "B": "yes", "C": false, "D": 1}
        })))
        .unwrap();
        assert_eq!(p.permissions.len(), 2);
        assert_eq!(p.permissions.get("A"), Some(&true));
        assert_eq!(p.permissions.get("C"), Some(&false));
    }

    #[test]
    fn non_object_permission_payloads_are_ignored() {
        let p = normalize_principal(
            raw_from(json!({"userType": "member", "permissions": ["A", "B"]})),
        )
        .unwrap();
        assert!(p.permissions.is_empty());
    }
}
