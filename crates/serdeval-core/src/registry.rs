//! Validator registry and dispatch.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use crate::detect::{detect_format, detect_format_from_filename};
use crate::error::ValidatorError;
use crate::format::Format;
use crate::outcome::ValidationOutcome;
use crate::validators;

/// A parse-check: accepts the raw input and returns the parser's message on
/// failure.
pub type ParseCheck = fn(&[u8]) -> Result<(), String>;

/// A validator bound to one concrete [`Format`].
///
/// Validators are plain values (a tag and a function pointer), so they are
/// `Copy` and can be shared freely across threads.
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    format: Format,
    check: ParseCheck,
}

impl Validator {
    /// The format this validator checks.
    pub fn format(&self) -> Format {
        self.format
    }

    /// Validate raw bytes. Parse failures come back as an invalid outcome.
    pub fn validate(&self, data: &[u8]) -> ValidationOutcome {
        tracing::debug!(format = %self.format, len = data.len(), "validating input");
        let outcome = ValidationOutcome::from_check(self.format, (self.check)(data));
        if let Some(error) = &outcome.error {
            // Messages can quote input lines, so only their size is logged.
            tracing::debug!(format = %self.format, error_len = error.len(), "validation failed");
        }
        outcome
    }

    /// Validate text; identical to [`validate`](Self::validate) on its bytes.
    pub fn validate_str(&self, data: &str) -> ValidationOutcome {
        self.validate(data.as_bytes())
    }
}

/// Registry that maps [`Format`] values to parse-checks.
///
/// Most callers should use [`ValidatorRegistry::with_defaults`] or the free
/// functions backed by the process-wide default registry. To drop formats or
/// swap in a different check, use [`ValidatorRegistry::builder`].
#[derive(Debug, Clone)]
pub struct ValidatorRegistry {
    checks: HashMap<Format, ParseCheck>,
}

impl ValidatorRegistry {
    /// Create an empty registry with no registered checks.
    pub fn new() -> Self {
        Self {
            checks: HashMap::new(),
        }
    }

    /// Create a registry holding the built-in check for every supported format.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for &(format, check) in DEFAULTS {
            registry.register(format, check);
        }
        registry
    }

    /// Create a [`ValidatorRegistryBuilder`] for ergonomic construction.
    ///
    /// # Example
    ///
    /// ```
    /// use serdeval_core::{Format, ValidatorRegistry};
    ///
    /// let registry = ValidatorRegistry::builder()
    ///     .with_defaults()
    ///     .without_format(Format::Csv)
    ///     .build();
    ///
    /// assert!(!registry.contains(Format::Csv));
    /// assert!(registry.contains(Format::Json));
    /// ```
    pub fn builder() -> ValidatorRegistryBuilder {
        ValidatorRegistryBuilder::new()
    }

    /// Register a check for a format, replacing any existing one.
    ///
    /// Checks registered for `auto` or `unknown` are stored but never handed
    /// out by [`validator_for`](Self::validator_for).
    pub fn register(&mut self, format: Format, check: ParseCheck) {
        self.checks.insert(format, check);
    }

    /// Whether a validator can be built for `format`.
    pub fn contains(&self, format: Format) -> bool {
        format.is_concrete() && self.checks.contains_key(&format)
    }

    /// The concrete formats this registry can validate, in canonical order.
    pub fn formats(&self) -> Vec<Format> {
        Format::SUPPORTED
            .iter()
            .copied()
            .filter(|format| self.checks.contains_key(format))
            .collect()
    }

    /// Build the validator for `format`.
    pub fn validator_for(&self, format: Format) -> Result<Validator, ValidatorError> {
        if !format.is_concrete() {
            return Err(ValidatorError::UnsupportedFormat(format));
        }
        self.checks
            .get(&format)
            .map(|&check| Validator { format, check })
            .ok_or(ValidatorError::UnsupportedFormat(format))
    }

    /// Detect the format from content and validate with it.
    pub fn validate_auto(&self, data: &[u8]) -> ValidationOutcome {
        match detect_format(data) {
            Format::Unknown => ValidationOutcome::undetected(),
            format => self.validate_as(format, data),
        }
    }

    /// Validate input that came from `source_name`.
    ///
    /// With [`Format::Auto`] the name is consulted first and content
    /// detection is the fallback. The outcome always records `source_name`.
    pub fn validate_named(
        &self,
        data: &[u8],
        source_name: &str,
        requested: Format,
    ) -> ValidationOutcome {
        let outcome = if requested == Format::Auto {
            match detect_format_from_filename(source_name) {
                Format::Unknown => self.validate_auto(data),
                format => {
                    tracing::debug!(%format, "format taken from source name");
                    self.validate_as(format, data)
                }
            }
        } else {
            self.validate_as(requested, data)
        };
        outcome.with_source_name(source_name)
    }

    /// Validate with an explicit format; an unavailable validator becomes an
    /// invalid outcome tagged with that format.
    pub(crate) fn validate_as(&self, format: Format, data: &[u8]) -> ValidationOutcome {
        match self.validator_for(format) {
            Ok(validator) => validator.validate(data),
            Err(e) => ValidationOutcome::invalid(format, e.to_string()),
        }
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Builder for constructing a [`ValidatorRegistry`] with fine-grained control.
///
/// # Example
///
/// ```
/// use serdeval_core::{Format, ValidatorRegistry};
///
/// fn accept_everything(_: &[u8]) -> Result<(), String> {
///     Ok(())
/// }
///
/// let registry = ValidatorRegistry::builder()
///     .with_defaults()
///     .register(Format::Markdown, accept_everything)
///     .without_format(Format::Protobuf)
///     .build();
///
/// assert_eq!(registry.formats().len(), 13);
/// ```
#[derive(Debug, Default)]
pub struct ValidatorRegistryBuilder {
    entries: Vec<(Format, ParseCheck)>,
    disabled: HashSet<Format>,
}

impl ValidatorRegistryBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Add all built-in checks (equivalent to [`ValidatorRegistry::with_defaults`]).
    pub fn with_defaults(&mut self) -> &mut Self {
        self.entries.extend_from_slice(DEFAULTS);
        self
    }

    /// Register a single check. Later registrations for the same format win.
    pub fn register(&mut self, format: Format, check: ParseCheck) -> &mut Self {
        self.entries.push((format, check));
        self
    }

    /// Exclude a format from the built registry, whatever was registered for it.
    pub fn without_format(&mut self, format: Format) -> &mut Self {
        self.disabled.insert(format);
        self
    }

    /// Produce a [`ValidatorRegistry`] from this builder.
    ///
    /// Drains the builder's disabled set via [`std::mem::take`], so calling
    /// `build()` a second time produces a registry with no disabled formats.
    pub fn build(&mut self) -> ValidatorRegistry {
        let disabled = std::mem::take(&mut self.disabled);
        let mut registry = ValidatorRegistry::new();
        for &(format, check) in &self.entries {
            if !disabled.contains(&format) {
                registry.register(format, check);
            }
        }
        registry
    }
}

// ============================================================================
// Built-in defaults
// ============================================================================

const DEFAULTS: &[(Format, ParseCheck)] = &[
    (Format::Json, validators::json::check),
    (Format::Yaml, validators::yaml::check),
    (Format::Xml, validators::xml::check),
    (Format::Toml, validators::toml::check),
    (Format::Csv, validators::csv::check),
    (Format::Graphql, validators::graphql::check),
    (Format::Ini, validators::ini::check),
    (Format::Hcl, validators::hcl::check),
    (Format::Protobuf, validators::protobuf::check),
    (Format::Markdown, validators::markdown::check),
    (Format::Jsonl, validators::json::check_lines),
    (Format::Jupyter, validators::json::check_notebook),
    (Format::Requirements, validators::requirements::check),
    (Format::Dockerfile, validators::dockerfile::check),
];

static DEFAULT_REGISTRY: LazyLock<ValidatorRegistry> = LazyLock::new(ValidatorRegistry::with_defaults);

/// The process-wide registry holding every built-in check.
pub fn default_registry() -> &'static ValidatorRegistry {
    &DEFAULT_REGISTRY
}

/// Build the default validator for `format`.
///
/// # Errors
///
/// [`ValidatorError::UnsupportedFormat`] for `auto` and `unknown`.
///
/// # Examples
///
/// ```
/// use serdeval_core::{Format, new_validator};
///
/// let validator = new_validator(Format::Json).unwrap();
/// assert!(validator.validate(br#"{"name": "test"}"#).valid);
/// assert!(new_validator(Format::Auto).is_err());
/// ```
pub fn new_validator(format: Format) -> Result<Validator, ValidatorError> {
    DEFAULT_REGISTRY.validator_for(format)
}

/// Detect the format of `data` and validate it with the default registry.
///
/// # Examples
///
/// ```
/// use serdeval_core::{Format, validate_auto};
///
/// let outcome = validate_auto(b"name: test\nvalue: 123");
/// assert!(outcome.valid);
/// assert_eq!(outcome.format, Format::Yaml);
///
/// let outcome = validate_auto(b"just some text");
/// assert_eq!(outcome.format, Format::Unknown);
/// assert_eq!(outcome.error.as_deref(), Some("unable to detect format"));
/// ```
pub fn validate_auto(data: &[u8]) -> ValidationOutcome {
    DEFAULT_REGISTRY.validate_auto(data)
}

/// Validate named input with the default registry.
///
/// See [`ValidatorRegistry::validate_named`].
pub fn validate_named(data: &[u8], source_name: &str, requested: Format) -> ValidationOutcome {
    DEFAULT_REGISTRY.validate_named(data, source_name, requested)
}
