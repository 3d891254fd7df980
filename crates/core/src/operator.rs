//! Operator identity and roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

/// Operator roles for authorization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Full access, including every file operation on behalf of any user.
    #[serde(rename = "super-admin")]
    SuperAdmin,
    /// Read-only operational access (health, identity); no file operations.
    #[serde(rename = "auditor")]
    Auditor,
}

impl Role {
    /// Parse from string.
    pub fn parse(s: &str) -> crate::Result<Self> {
        match s {
            "super-admin" => Ok(Self::SuperAdmin),
            "auditor" => Ok(Self::Auditor),
            _ => Err(crate::Error::InvalidRole(s.to_string())),
        }
    }

    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super-admin",
            Self::Auditor => "auditor",
        }
    }

    /// Check if this role implies another role.
    pub fn implies(&self, other: &Self) -> bool {
        match self {
            Self::SuperAdmin => true, // super-admin implies all
            Self::Auditor => matches!(other, Self::Auditor),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated operator identity.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Operator {
    /// Granted role.
    pub role: Role,
    /// Description for the operator token.
    pub description: Option<String>,
    /// When the token expires.
    #[serde(with = "time::serde::rfc3339::option")]
    pub expires_at: Option<OffsetDateTime>,
}

impl Operator {
    /// Check if the operator token is valid (not expired).
    pub fn is_valid(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => OffsetDateTime::now_utc() <= expires_at,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;

    #[test]
    fn role_parse_round_trip() {
        for role in [Role::SuperAdmin, Role::Auditor] {
            assert_eq!(Role::parse(role.as_str()).unwrap(), role);
        }
        assert!(Role::parse("admin").is_err());
        assert!(Role::parse("").is_err());
    }

    #[test]
    fn super_admin_implies_all() {
        assert!(Role::SuperAdmin.implies(&Role::SuperAdmin));
        assert!(Role::SuperAdmin.implies(&Role::Auditor));
        assert!(!Role::Auditor.implies(&Role::SuperAdmin));
    }

    #[test]
    fn operator_without_expiry_is_valid() {
        let operator = Operator {
            role: Role::SuperAdmin,
            description: None,
            expires_at: None,
        };
        assert!(operator.is_valid());
    }

    #[test]
    fn expired_operator_is_invalid() {
        let operator = Operator {
            role: Role::SuperAdmin,
            description: None,
            expires_at: Some(OffsetDateTime::now_utc() - Duration::seconds(1)),
        };
        assert!(!operator.is_valid());

        let live = Operator {
            role: Role::SuperAdmin,
            description: None,
            expires_at: Some(OffsetDateTime::now_utc() + Duration::hours(1)),
        };
        assert!(live.is_valid());
    }
}
