//! Shared error type for record-store adapters.

/// Failures raised by the tabular store adapters.
///
/// Every repository port returns this type; the domain maps it to the
/// internal-error class with the message passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The store endpoint could not be reached.
    #[error("store transport failed: {message}")]
    Transport { message: String },
    /// The store rejected or failed the operation.
    #[error("store query failed: {message}")]
    Query { message: String },
    /// The store answered with a payload the adapter could not decode.
    #[error("store payload could not be decoded: {message}")]
    Decode { message: String },
}

impl StoreError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}
