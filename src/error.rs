//! Crate-level error types.
//!
//! [`FlatQubeError`] unifies every error source (configuration, HTTP
//! transport, response parsing, identifier resolution) behind a single enum
//! so callers can match on the variant they care about while still using the
//! `?` operator for easy propagation.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FlatQubeError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum FlatQubeError {
    /// A configuration file could not be found, read, or deserialized.
    #[error("configuration error: {0}")]
    Config(String),

    /// An HTTP request failed: connection error, timeout, or non-2xx status.
    /// Carries the underlying cause message; callers never see transport
    /// types directly.
    #[error("client error: {0}")]
    Client(String),

    /// A response record failed model validation. Carries the entity kind
    /// and the offending raw payload for diagnostics.
    #[error("cannot parse {entity} info: {reason}")]
    Parse {
        entity: &'static str,
        reason: String,
        payload: String,
    },

    /// A user-supplied currency name has no configured address.
    #[error("'{0}' currency address is unknown. The currency does not exist in the config.")]
    UnknownCurrency(String),

    /// A requested currency list does not exist in the configuration.
    #[error("'{0}' currency list does not exist in the config.")]
    UnknownList(String),

    /// A local I/O operation (terminal control, config write) failed.
    #[error("i/o error: {0}")]
    Io(String),
}

impl From<reqwest::Error> for FlatQubeError {
    fn from(err: reqwest::Error) -> Self {
        FlatQubeError::Client(err.to_string())
    }
}

impl From<std::io::Error> for FlatQubeError {
    fn from(err: std::io::Error) -> Self {
        FlatQubeError::Io(err.to_string())
    }
}
