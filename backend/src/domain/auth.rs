//! Authentication primitives: login credentials, roles, and token claims.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::DomainError;

/// Role stamped into issued tokens and checked by route guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Admin,
    SuperAdmin,
}

/// Validated login credentials used by the login flows.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming.
/// - `password` must be non-empty but retains caller-provided whitespace to
///   avoid surprising digest comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, DomainError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(DomainError::invalid_request("email must not be empty"));
        }
        if password.is_empty() {
            return Err(DomainError::invalid_request("password must not be empty"));
        }
        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email string suitable for account lookups.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Claims carried by a signed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Account id of the token holder.
    pub subject: i64,
    pub email: String,
    pub role: Role,
    pub expires_at: DateTime<Utc>,
}

impl Claims {
    /// True when the holder's role appears in `allowed`.
    pub fn has_role(&self, allowed: &[Role]) -> bool {
        allowed.contains(&self.role)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Student => "student",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw")]
    #[case("   ", "pw")]
    #[case("a@b.c", "")]
    fn invalid_credentials_are_rejected(#[case] email: &str, #[case] password: &str) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err.code(), crate::domain::ErrorCode::InvalidRequest);
    }

    #[test]
    fn email_is_trimmed_and_password_preserved() {
        let creds = LoginCredentials::try_from_parts("  ada@example.edu  ", " pw ")
            .expect("valid inputs should succeed");
        assert_eq!(creds.email(), "ada@example.edu");
        assert_eq!(creds.password(), " pw ");
    }

    #[rstest]
    #[case(Role::Student, &[Role::Admin, Role::SuperAdmin], false)]
    #[case(Role::Admin, &[Role::Admin, Role::SuperAdmin], true)]
    #[case(Role::SuperAdmin, &[Role::SuperAdmin], true)]
    fn role_membership(#[case] role: Role, #[case] allowed: &[Role], #[case] expected: bool) {
        let claims = Claims {
            subject: 1,
            email: "x@example.edu".to_owned(),
            role,
            expires_at: Utc::now(),
        };
        assert_eq!(claims.has_role(allowed), expected);
    }
}
