//! Error types

use thiserror::Error;

use crate::format::Format;

/// Errors raised when a validator cannot be constructed.
///
/// Parse failures are never errors: they come back as an invalid
/// [`ValidationOutcome`](crate::ValidationOutcome).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidatorError {
    /// The format is a sentinel (`auto`, `unknown`) or has no registered
    /// parse-check.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(Format),

    /// A string did not name any known format.
    #[error("unknown format name: {0}")]
    UnknownFormatName(String),
}

/// Errors that make a [`Config`](crate::Config) unusable.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to parse configuration")]
    Parse(#[source] toml::de::Error),

    #[error("sentinel format cannot be disabled: {0}")]
    SentinelDisabled(Format),

    #[error("default format cannot be unknown")]
    UnknownDefaultFormat,

    #[error("default format {0} is disabled")]
    DefaultFormatDisabled(Format),

    #[error("max_input_bytes must be greater than zero")]
    ZeroInputLimit,
}
