// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User identity and roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Platform role. Exactly one per user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Role {
    Client,
    Coach,
    Admin,
    Support,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Client, Role::Coach, Role::Admin, Role::Support];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "CLIENT",
            Role::Coach => "COACH",
            Role::Admin => "ADMIN",
            Role::Support => "SUPPORT",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A role string outside the four known values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CLIENT" => Ok(Role::Client),
            "COACH" => Ok(Role::Coach),
            "ADMIN" => Ok(Role::Admin),
            "SUPPORT" => Ok(Role::Support),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// A platform user, as handed over by the authentication layer.
///
/// Two records with the same `id` are the same identity, even if their
/// display fields differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    /// Avatar image URI
    pub avatar: String,
    /// Year the user joined, e.g. "2023"
    pub member_since: String,
    /// Free-text skill tag, e.g. "Intermediate"
    pub level: String,
}

impl User {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, first: &str, role: Role) -> User {
        User {
            id: id.to_string(),
            first_name: first.to_string(),
            last_name: "Doe".to_string(),
            email: format!("{id}@ironpulse.test"),
            role,
            avatar: String::new(),
            member_since: "2024".to_string(),
            level: "Beginner".to_string(),
        }
    }

    #[test]
    fn test_role_parse_known_values() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn test_role_parse_rejects_unknown() {
        assert_eq!(
            "SUPERADMIN".parse::<Role>(),
            Err(UnknownRole("SUPERADMIN".to_string()))
        );
        // No case folding
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_json_is_uppercase() {
        assert_eq!(serde_json::to_string(&Role::Support).unwrap(), "\"SUPPORT\"");
        assert!(serde_json::from_str::<Role>("\"OWNER\"").is_err());
    }

    #[test]
    fn test_user_equality_by_id() {
        let a = user("u1", "Alex", Role::Client);
        let renamed = user("u1", "Alexandra", Role::Client);
        let other = user("u2", "Alex", Role::Client);

        assert_eq!(a, renamed);
        assert_ne!(a, other);
    }

    #[test]
    fn test_user_json_field_names() {
        let json = serde_json::to_value(user("u1", "Alex", Role::Coach)).unwrap();
        assert_eq!(json["firstName"], "Alex");
        assert_eq!(json["memberSince"], "2024");
        assert_eq!(json["role"], "COACH");
    }
}
