//! Credential codec ports: one-way password digests and signed-claims tokens.
//!
//! Both are opaque collaborators to the domain; the concrete scheme lives in
//! the outbound layer and can be swapped without touching the login flows.

use crate::domain::auth::{Claims, Role};

/// Failures raised by the credential codec.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    /// The token's expiry instant has passed.
    #[error("token expired")]
    Expired,
    /// The token is malformed or its signature does not verify.
    #[error("invalid token: {message}")]
    Invalid { message: String },
    /// The codec could not produce a token.
    #[error("token issuance failed: {message}")]
    Issue { message: String },
}

impl CredentialError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    pub fn issue(message: impl Into<String>) -> Self {
        Self::Issue {
            message: message.into(),
        }
    }
}

/// One-way password digest.
pub trait PasswordHasher: Send + Sync {
    /// Digest a plaintext password for storage.
    fn digest(&self, password: &str) -> String;

    /// Compare a plaintext password against a stored digest.
    fn verify(&self, password: &str, stored_digest: &str) -> bool {
        self.digest(password) == stored_digest
    }
}

/// Signed-claims token codec with expiry.
pub trait TokenCodec: Send + Sync {
    /// Issue a token for the given identity, expiring after `ttl`.
    fn issue(
        &self,
        subject: i64,
        email: &str,
        role: Role,
        ttl: chrono::Duration,
    ) -> Result<String, CredentialError>;

    /// Verify a token and return its claims.
    fn verify(&self, token: &str) -> Result<Claims, CredentialError>;
}
