//! Validation configuration, loaded from TOML text.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::detect::detect_format_from_filename;
use crate::error::ConfigError;
use crate::format::Format;
use crate::outcome::ValidationOutcome;
use crate::registry::ValidatorRegistry;

/// Configuration for validation runs.
///
/// ```toml
/// default_format = "auto"
/// disabled_formats = ["csv"]
/// max_input_bytes = 10485760
/// ```
///
/// Every field is optional; an empty document yields [`Config::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Format used when a caller does not request one
    #[schemars(description = "Format used when none is requested (\"auto\" detects it)")]
    default_format: Format,

    /// Formats removed from the registry
    #[schemars(description = "Formats that are never validated (e.g., [\"csv\", \"ini\"])")]
    disabled_formats: Vec<Format>,

    /// Upper bound on input size. `None` disables the limit.
    #[schemars(description = "Inputs larger than this many bytes fail without being parsed")]
    max_input_bytes: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_format: Format::Auto,
            disabled_formats: Vec::new(),
            max_input_bytes: None,
        }
    }
}

impl Config {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed TOML or unknown keys, and any error
    /// from [`validate`](Self::validate).
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Create a [`ConfigBuilder`] starting from the defaults.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Check semantic constraints TOML parsing cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(&sentinel) = self.disabled_formats.iter().find(|f| !f.is_concrete()) {
            return Err(ConfigError::SentinelDisabled(sentinel));
        }
        if self.default_format == Format::Unknown {
            return Err(ConfigError::UnknownDefaultFormat);
        }
        if self.is_disabled(self.default_format) {
            return Err(ConfigError::DefaultFormatDisabled(self.default_format));
        }
        if self.max_input_bytes == Some(0) {
            return Err(ConfigError::ZeroInputLimit);
        }
        Ok(())
    }

    pub fn default_format(&self) -> Format {
        self.default_format
    }

    pub fn disabled_formats(&self) -> &[Format] {
        &self.disabled_formats
    }

    pub fn max_input_bytes(&self) -> Option<usize> {
        self.max_input_bytes
    }

    pub fn is_disabled(&self, format: Format) -> bool {
        self.disabled_formats.contains(&format)
    }

    /// Build a registry holding every built-in check except the disabled ones.
    pub fn registry(&self) -> ValidatorRegistry {
        let mut builder = ValidatorRegistry::builder();
        builder.with_defaults();
        for &format in &self.disabled_formats {
            builder.without_format(format);
        }
        builder.build()
    }

    /// Validate named input under this configuration.
    ///
    /// `requested` falls back to [`default_format`](Self::default_format).
    /// Oversized input fails before any parsing, tagged with the format that
    /// would have been used (`unknown` when only content could tell).
    ///
    /// Builds a fresh registry per call; callers validating many inputs can
    /// hold on to [`registry`](Self::registry) and use
    /// [`validate_named_with`](Self::validate_named_with).
    pub fn validate_named(
        &self,
        data: &[u8],
        source_name: &str,
        requested: Option<Format>,
    ) -> ValidationOutcome {
        self.validate_named_with(&self.registry(), data, source_name, requested)
    }

    /// [`validate_named`](Self::validate_named) against a caller-held registry.
    pub fn validate_named_with(
        &self,
        registry: &ValidatorRegistry,
        data: &[u8],
        source_name: &str,
        requested: Option<Format>,
    ) -> ValidationOutcome {
        let requested = requested.unwrap_or(self.default_format);

        if let Some(limit) = self.max_input_bytes
            && data.len() > limit
        {
            let format = match requested {
                Format::Auto => detect_format_from_filename(source_name),
                explicit => explicit,
            };
            tracing::debug!(limit, bytes = data.len(), %format, "input over size limit");
            return ValidationOutcome::invalid(
                format,
                format!("input exceeds {} bytes (got {})", limit, data.len()),
            )
            .with_source_name(source_name);
        }

        registry.validate_named(data, source_name, requested)
    }
}

/// Builder for [`Config`], validating on [`build`](ConfigBuilder::build).
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    fn new() -> Self {
        Self::default()
    }

    pub fn default_format(&mut self, format: Format) -> &mut Self {
        self.config.default_format = format;
        self
    }

    pub fn disable(&mut self, format: Format) -> &mut Self {
        if !self.config.is_disabled(format) {
            self.config.disabled_formats.push(format);
        }
        self
    }

    pub fn max_input_bytes(&mut self, limit: Option<usize>) -> &mut Self {
        self.config.max_input_bytes = limit;
        self
    }

    /// Validate and return the configuration.
    pub fn build(&mut self) -> Result<Config, ConfigError> {
        let config = self.config.clone();
        config.validate()?;
        Ok(config)
    }
}

/// JSON schema for the configuration file, for editor integration.
pub fn generate_schema() -> schemars::Schema {
    schemars::schema_for!(Config)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Parsing ----

    #[test]
    fn test_empty_document_is_default() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.default_format(), Format::Auto);
        assert!(config.disabled_formats().is_empty());
        assert_eq!(config.max_input_bytes(), None);
    }

    #[test]
    fn test_full_document() {
        let config = Config::from_toml_str(
            r#"
default_format = "yaml"
disabled_formats = ["csv", "ini"]
max_input_bytes = 1024
"#,
        )
        .unwrap();

        assert_eq!(config.default_format(), Format::Yaml);
        assert_eq!(config.disabled_formats(), &[Format::Csv, Format::Ini]);
        assert_eq!(config.max_input_bytes(), Some(1024));
    }

    #[test]
    fn test_unknown_format_name_is_parse_error() {
        let err = Config::from_toml_str("default_format = \"jsn\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_unknown_key_is_parse_error() {
        let err = Config::from_toml_str("max_bytes = 10").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    // ---- Semantic validation ----

    #[test]
    fn test_sentinel_cannot_be_disabled() {
        let err = Config::from_toml_str("disabled_formats = [\"auto\"]").unwrap_err();
        assert!(matches!(err, ConfigError::SentinelDisabled(Format::Auto)));

        let err = Config::builder().disable(Format::Unknown).build().unwrap_err();
        assert!(matches!(err, ConfigError::SentinelDisabled(Format::Unknown)));
    }

    #[test]
    fn test_default_format_cannot_be_disabled() {
        let err = Config::from_toml_str(
            "default_format = \"json\"\ndisabled_formats = [\"json\"]",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::DefaultFormatDisabled(Format::Json)));
    }

    #[test]
    fn test_unknown_default_format_rejected() {
        let err = Config::from_toml_str("default_format = \"unknown\"").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownDefaultFormat));

        let err = Config::builder()
            .default_format(Format::Unknown)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownDefaultFormat));
    }

    #[test]
    fn test_zero_limit_rejected() {
        let err = Config::from_toml_str("max_input_bytes = 0").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroInputLimit));
    }

    #[test]
    fn test_builder_deduplicates_disabled() {
        let config = Config::builder()
            .disable(Format::Csv)
            .disable(Format::Csv)
            .build()
            .unwrap();
        assert_eq!(config.disabled_formats(), &[Format::Csv]);
    }

    // ---- Registry and validation ----

    #[test]
    fn test_registry_excludes_disabled() {
        let config = Config::builder().disable(Format::Csv).build().unwrap();
        let registry = config.registry();
        assert!(!registry.contains(Format::Csv));
        assert!(registry.contains(Format::Json));
    }

    #[test]
    fn test_disabled_format_yields_invalid_outcome() {
        let config = Config::builder().disable(Format::Csv).build().unwrap();
        let outcome = config.validate_named(b"a,b\n1,2\n", "data.csv", None);

        assert!(!outcome.valid);
        assert_eq!(outcome.format, Format::Csv);
        assert_eq!(outcome.error.as_deref(), Some("unsupported format: csv"));
    }

    #[test]
    fn test_default_format_applies_when_not_requested() {
        let config = Config::builder()
            .default_format(Format::Json)
            .build()
            .unwrap();
        let outcome = config.validate_named(b"key: value", "input", None);

        assert_eq!(outcome.format, Format::Json);
        assert!(!outcome.valid);
    }

    #[test]
    fn test_explicit_request_overrides_default() {
        let config = Config::builder()
            .default_format(Format::Json)
            .build()
            .unwrap();
        let outcome = config.validate_named(b"key: value", "input", Some(Format::Yaml));
        assert!(outcome.valid);
        assert_eq!(outcome.format, Format::Yaml);
    }

    #[test]
    fn test_oversized_input_fails_fast() {
        let config = Config::builder().max_input_bytes(Some(4)).build().unwrap();
        let outcome = config.validate_named(b"{\"a\": 1}", "big.json", None);

        assert!(!outcome.valid);
        assert_eq!(outcome.format, Format::Json);
        assert_eq!(
            outcome.error.as_deref(),
            Some("input exceeds 4 bytes (got 8)")
        );
        assert_eq!(outcome.source_name.as_deref(), Some("big.json"));
    }

    #[test]
    fn test_oversized_input_without_name_hint_is_unknown() {
        let config = Config::builder().max_input_bytes(Some(1)).build().unwrap();
        let outcome = config.validate_named(b"{}", "stdin", None);
        assert_eq!(outcome.format, Format::Unknown);
        assert!(!outcome.valid);
    }

    #[test]
    fn test_input_at_limit_is_validated() {
        let config = Config::builder().max_input_bytes(Some(2)).build().unwrap();
        let outcome = config.validate_named(b"{}", "x.json", None);
        assert!(outcome.valid);
    }

    #[test]
    fn test_validate_named_with_shared_registry() {
        let config = Config::default();
        let registry = config.registry();
        for (data, name) in [(&b"a = 1"[..], "a.toml"), (&b"[x]\ny=1"[..], "b.ini")] {
            assert!(config.validate_named_with(&registry, data, name, None).valid);
        }
    }

    // ---- Serialization ----

    #[test]
    fn test_serialize_roundtrip() {
        let config = Config::builder()
            .default_format(Format::Hcl)
            .disable(Format::Markdown)
            .max_input_bytes(Some(2048))
            .build()
            .unwrap();
        let text = toml::to_string(&config).unwrap();
        assert_eq!(Config::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_schema_lists_fields() {
        let schema = serde_json::to_value(generate_schema()).unwrap();
        let properties = &schema["properties"];
        assert!(properties.get("default_format").is_some());
        assert!(properties.get("disabled_formats").is_some());
        assert!(properties.get("max_input_bytes").is_some());
    }
}
