//! Environment-driven configuration.
//!
//! The token secret and store coordinates are required; startup fails
//! without them instead of falling back to a well-known placeholder.

use std::env;

use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_STUDENT_TOKEN_TTL_HOURS: i64 = 1;
const DEFAULT_ADMIN_TOKEN_TTL_HOURS: i64 = 2;

/// Configuration failures reported at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("required environment variable {name} is not set")]
    Missing { name: &'static str },
    #[error("environment variable {name} is invalid: {message}")]
    Invalid { name: &'static str, message: String },
}

/// Runtime settings for the server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket address the HTTP server binds to.
    pub bind_addr: String,
    /// Base URL of the hosted tabular store's REST endpoint.
    pub store_url: Url,
    /// Service key sent with every store request.
    pub store_api_key: String,
    /// Shared secret for the signed-claims token codec.
    pub token_secret: String,
    /// Lifetime of student tokens.
    pub student_token_ttl: chrono::Duration,
    /// Lifetime of admin and super-admin tokens.
    pub admin_token_ttl: chrono::Duration,
}

impl AppConfig {
    /// Read configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when a required variable is missing or malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let store_url_raw = require("STORE_URL")?;
        let store_url = Url::parse(&ensure_trailing_slash(store_url_raw)).map_err(|err| {
            ConfigError::Invalid {
                name: "STORE_URL",
                message: err.to_string(),
            }
        })?;

        Ok(Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned()),
            store_url,
            store_api_key: require("STORE_API_KEY")?,
            token_secret: require("TOKEN_SECRET")?,
            student_token_ttl: ttl_hours(
                "STUDENT_TOKEN_TTL_HOURS",
                DEFAULT_STUDENT_TOKEN_TTL_HOURS,
            )?,
            admin_token_ttl: ttl_hours("ADMIN_TOKEN_TTL_HOURS", DEFAULT_ADMIN_TOKEN_TTL_HOURS)?,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing { name }),
    }
}

fn ttl_hours(name: &'static str, default: i64) -> Result<chrono::Duration, ConfigError> {
    match env::var(name) {
        Err(_) => Ok(chrono::Duration::hours(default)),
        Ok(raw) => {
            let hours: i64 = raw.parse().map_err(|_| ConfigError::Invalid {
                name,
                message: format!("expected a whole number of hours, got {raw:?}"),
            })?;
            if hours <= 0 {
                return Err(ConfigError::Invalid {
                    name,
                    message: "token lifetime must be positive".to_owned(),
                });
            }
            Ok(chrono::Duration::hours(hours))
        }
    }
}

/// `Url::join` treats a base without a trailing slash as a file and replaces
/// its last segment, so normalise here once.
fn ensure_trailing_slash(raw: String) -> String {
    if raw.ends_with('/') {
        raw
    } else {
        format!("{raw}/")
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn trailing_slash_is_normalised() {
        assert_eq!(
            ensure_trailing_slash("https://db.example/rest/v1".to_owned()),
            "https://db.example/rest/v1/"
        );
        assert_eq!(
            ensure_trailing_slash("https://db.example/rest/v1/".to_owned()),
            "https://db.example/rest/v1/"
        );
    }
}
