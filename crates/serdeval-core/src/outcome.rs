//! Uniform validation result record

use serde::{Deserialize, Serialize};

use crate::format::Format;

/// Message carried by the outcome of a buffer no heuristic could classify.
pub const UNDETECTED_MESSAGE: &str = "unable to detect format";

/// The result of validating one buffer.
///
/// Produced fresh per call and never mutated afterwards, apart from the
/// builder-style [`with_source_name`](Self::with_source_name) applied before
/// it is handed back. `error` is set only when `valid` is false.
///
/// Serializes to the shape `{"valid", "format", "error", "filename"}` with the
/// optional fields omitted when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub format: Format,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Where the data came from (file name, `stdin`, ...), when known.
    #[serde(
        rename = "filename",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub source_name: Option<String>,
}

impl ValidationOutcome {
    pub fn valid(format: Format) -> Self {
        Self {
            valid: true,
            format,
            error: None,
            source_name: None,
        }
    }

    pub fn invalid(format: Format, error: impl Into<String>) -> Self {
        Self {
            valid: false,
            format,
            error: Some(error.into()),
            source_name: None,
        }
    }

    /// The outcome for content that detection could not classify.
    pub fn undetected() -> Self {
        Self::invalid(Format::Unknown, UNDETECTED_MESSAGE)
    }

    /// Map a parse-check result onto an outcome for `format`.
    pub fn from_check(format: Format, check: Result<(), String>) -> Self {
        match check {
            Ok(()) => Self::valid(format),
            Err(message) => Self::invalid(format, message),
        }
    }

    /// Record where the validated data came from.
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }
}
