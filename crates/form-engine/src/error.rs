// File: src/error.rs
// Purpose: Configuration errors raised before an engine exists

use thiserror::Error;

/// A fault in the engine's configuration.
///
/// Failing validation is never reported through this type: an invalid field
/// is an [`ErrorMap`](crate::ErrorMap) entry. `ConfigError` covers programmer
/// mistakes caught while building the rule set.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid pattern `{pattern}`: {error}")]
    InvalidPattern {
        pattern: String,
        #[source]
        error: Box<regex::Error>,
    },

    #[error("unsupported pattern flag `{flag}` in `{pattern}`")]
    UnsupportedFlag { pattern: String, flag: char },

    #[error("unknown field `{0}`")]
    UnknownField(String),

    #[error("unknown validator `{validator}` on field `{field}`")]
    UnknownValidator { field: String, validator: String },

    #[error("failed to read rules from {origin}: {error}")]
    Read {
        origin: String,
        #[source]
        error: std::io::Error,
    },

    #[error("failed to parse rules from {origin}: {error}")]
    Parse {
        origin: String,
        #[source]
        error: Box<toml::de::Error>,
    },
}

pub type Result<T, E = ConfigError> = std::result::Result<T, E>;
