//! Credential codec implementations: hex SHA-256 password digests and a
//! shared-secret signed-claims token.
//!
//! The token format is `base64url(claims JSON) . hex(sha256(secret . payload))`.
//! Anything stronger can replace it behind the [`TokenCodec`] port without
//! touching the login flows.

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::domain::auth::{Claims, Role};
use crate::domain::ports::{Clock, CredentialError, PasswordHasher, TokenCodec};

/// Hex-encoded SHA-256 digest, matching the stored student/admin rows.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256PasswordHasher;

impl PasswordHasher for Sha256PasswordHasher {
    fn digest(&self, password: &str) -> String {
        hex::encode(Sha256::digest(password.as_bytes()))
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ClaimsDto {
    sub: i64,
    email: String,
    role: Role,
    exp: i64,
}

/// Shared-secret token codec with expiry.
pub struct SignedTokenCodec {
    secret: Zeroizing<String>,
    clock: Arc<dyn Clock>,
}

impl SignedTokenCodec {
    pub fn new(secret: String, clock: Arc<dyn Clock>) -> Self {
        Self {
            secret: Zeroizing::new(secret),
            clock,
        }
    }

    fn signature(&self, payload: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.as_bytes());
        hasher.update(b".");
        hasher.update(payload.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl TokenCodec for SignedTokenCodec {
    fn issue(
        &self,
        subject: i64,
        email: &str,
        role: Role,
        ttl: chrono::Duration,
    ) -> Result<String, CredentialError> {
        let expires_at = self.clock.now() + ttl;
        let claims = ClaimsDto {
            sub: subject,
            email: email.to_owned(),
            role,
            exp: expires_at.timestamp(),
        };
        let json = serde_json::to_vec(&claims)
            .map_err(|err| CredentialError::issue(err.to_string()))?;
        let payload = URL_SAFE_NO_PAD.encode(json);
        let signature = self.signature(&payload);
        Ok(format!("{payload}.{signature}"))
    }

    fn verify(&self, token: &str) -> Result<Claims, CredentialError> {
        let (payload, signature) = token
            .split_once('.')
            .ok_or_else(|| CredentialError::invalid("missing signature separator"))?;
        if self.signature(payload) != signature {
            return Err(CredentialError::invalid("signature mismatch"));
        }

        let json = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|err| CredentialError::invalid(format!("payload encoding: {err}")))?;
        let dto: ClaimsDto = serde_json::from_slice(&json)
            .map_err(|err| CredentialError::invalid(format!("payload shape: {err}")))?;

        let expires_at = expiry_instant(dto.exp)?;
        if expires_at <= self.clock.now() {
            return Err(CredentialError::Expired);
        }
        Ok(Claims {
            subject: dto.sub,
            email: dto.email,
            role: dto.role,
            expires_at,
        })
    }
}

fn expiry_instant(timestamp: i64) -> Result<DateTime<Utc>, CredentialError> {
    Utc.timestamp_opt(timestamp, 0)
        .single()
        .ok_or_else(|| CredentialError::invalid("expiry out of range"))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use std::sync::Mutex;

    struct TestClock(Mutex<DateTime<Utc>>);

    impl TestClock {
        fn at(instant: DateTime<Utc>) -> Arc<Self> {
            Arc::new(Self(Mutex::new(instant)))
        }

        fn advance(&self, by: chrono::Duration) {
            let mut now = self.0.lock().expect("clock lock");
            *now += by;
        }
    }

    impl Clock for TestClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().expect("clock lock")
        }
    }

    fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().expect("valid instant")
    }

    #[test]
    fn digests_are_stable_hex_sha256() {
        let hasher = Sha256PasswordHasher;
        let digest = hasher.digest("password");
        assert_eq!(
            digest,
            "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
        );
        assert!(hasher.verify("password", &digest));
        assert!(!hasher.verify("Password", &digest));
    }

    #[test]
    fn tokens_round_trip_claims() {
        let clock = TestClock::at(epoch());
        let codec = SignedTokenCodec::new("secret".to_owned(), clock);
        let token = codec
            .issue(7, "ada@example.edu", Role::Student, chrono::Duration::hours(1))
            .expect("issue");
        let claims = codec.verify(&token).expect("verify");
        assert_eq!(claims.subject, 7);
        assert_eq!(claims.email, "ada@example.edu");
        assert_eq!(claims.role, Role::Student);
        assert_eq!(claims.expires_at, epoch() + chrono::Duration::hours(1));
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let clock = TestClock::at(epoch());
        let codec = SignedTokenCodec::new("secret".to_owned(), Arc::clone(&clock) as Arc<dyn Clock>);
        let token = codec
            .issue(7, "ada@example.edu", Role::Admin, chrono::Duration::hours(2))
            .expect("issue");
        clock.advance(chrono::Duration::hours(3));
        assert_eq!(codec.verify(&token), Err(CredentialError::Expired));
    }

    #[test]
    fn tampered_payloads_fail_verification() {
        let clock = TestClock::at(epoch());
        let codec = SignedTokenCodec::new("secret".to_owned(), clock);
        let token = codec
            .issue(7, "ada@example.edu", Role::SuperAdmin, chrono::Duration::hours(1))
            .expect("issue");
        let (payload, signature) = token.split_once('.').expect("two parts");
        let forged_claims = ClaimsDto {
            sub: 8,
            email: "eve@example.edu".to_owned(),
            role: Role::SuperAdmin,
            exp: epoch().timestamp() + 3600,
        };
        let forged_payload =
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged_claims).expect("json"));
        assert_ne!(forged_payload, payload);
        let forged = format!("{forged_payload}.{signature}");
        assert!(matches!(
            codec.verify(&forged),
            Err(CredentialError::Invalid { .. })
        ));
    }

    #[test]
    fn tokens_signed_with_another_secret_fail() {
        let clock = TestClock::at(epoch());
        let codec = SignedTokenCodec::new("secret".to_owned(), Arc::clone(&clock) as Arc<dyn Clock>);
        let other = SignedTokenCodec::new("other".to_owned(), clock);
        let token = other
            .issue(7, "ada@example.edu", Role::Student, chrono::Duration::hours(1))
            .expect("issue");
        assert!(matches!(
            codec.verify(&token),
            Err(CredentialError::Invalid { .. })
        ));
    }
}
