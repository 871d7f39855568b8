//! Outbound adapters: the hosted-store client and the credential codec.

pub mod credentials;
pub mod store;

pub use self::credentials::{Sha256PasswordHasher, SignedTokenCodec};
