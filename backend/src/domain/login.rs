//! Login flows for students and staff.
//!
//! Both flows share the same shape: look the account up by email, compare
//! the one-way digest, require an active account, then mint a signed token.
//! The "Invalid email or password" wording is shared between the missing
//! account and wrong password branches so callers cannot probe which emails
//! exist.

use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::auth::{LoginCredentials, Role};
use crate::domain::ports::{AdminRepository, PasswordHasher, StudentRepository, TokenCodec};
use crate::domain::student::AccountStatus;
use crate::domain::DomainError;

/// Token payload returned by the login endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct IssuedToken {
    pub access_token: String,
    pub token_type: String,
}

impl IssuedToken {
    fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_owned(),
        }
    }
}

/// Authenticates students against the student directory.
pub struct StudentLoginService {
    students: Arc<dyn StudentRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenCodec>,
    token_ttl: chrono::Duration,
}

impl StudentLoginService {
    pub fn new(
        students: Arc<dyn StudentRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenCodec>,
        token_ttl: chrono::Duration,
    ) -> Self {
        Self {
            students,
            hasher,
            tokens,
            token_ttl,
        }
    }

    pub async fn login(&self, credentials: &LoginCredentials) -> Result<IssuedToken, DomainError> {
        let account = self
            .students
            .find_by_email(credentials.email())
            .await?
            .ok_or_else(|| DomainError::not_found("Invalid email or password"))?;

        if !self
            .hasher
            .verify(credentials.password(), &account.password_digest)
        {
            return Err(DomainError::unauthorized("Invalid email or password"));
        }
        if account.status != AccountStatus::Active {
            return Err(DomainError::forbidden("Account inactive. Contact admin."));
        }

        let token = self.tokens.issue(
            account.id,
            &account.email,
            Role::Student,
            self.token_ttl,
        )?;
        Ok(IssuedToken::bearer(token))
    }
}

/// Authenticates admins and the super admin; the role comes from the record.
pub struct AdminLoginService {
    admins: Arc<dyn AdminRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenCodec>,
    token_ttl: chrono::Duration,
}

impl AdminLoginService {
    pub fn new(
        admins: Arc<dyn AdminRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenCodec>,
        token_ttl: chrono::Duration,
    ) -> Self {
        Self {
            admins,
            hasher,
            tokens,
            token_ttl,
        }
    }

    pub async fn login(&self, credentials: &LoginCredentials) -> Result<IssuedToken, DomainError> {
        let account = self
            .admins
            .find_by_email(credentials.email())
            .await?
            .ok_or_else(|| DomainError::not_found("Invalid email or password"))?;

        if !self
            .hasher
            .verify(credentials.password(), &account.password_digest)
        {
            return Err(DomainError::unauthorized("Invalid email or password"));
        }
        if account.status != AccountStatus::Active {
            return Err(DomainError::forbidden("Account inactive"));
        }

        let role = match account.role {
            crate::domain::admin::AdminRole::Admin => Role::Admin,
            crate::domain::admin::AdminRole::SuperAdmin => Role::SuperAdmin,
        };
        let token = self
            .tokens
            .issue(account.id, &account.email, role, self.token_ttl)?;
        Ok(IssuedToken::bearer(token))
    }
}
