//! Format enum for detection and validator dispatch.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ValidatorError;

/// A structured text format the validator understands.
///
/// Each concrete variant maps to exactly one parse-check registered in the
/// [`ValidatorRegistry`](crate::ValidatorRegistry). [`Format::Auto`] and
/// [`Format::Unknown`] are sentinels: the first asks for detection, the
/// second reports that detection failed. Neither can be validated.
///
/// The enum derives [`Hash`], [`Eq`], and [`Copy`] so that it can key
/// [`HashMap`](std::collections::HashMap)-backed registries without
/// allocation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// JSON document
    Json,
    /// YAML document or multi-document stream
    Yaml,
    /// XML document (well-formedness only)
    Xml,
    /// TOML document
    Toml,
    /// Comma-separated values with rectangular rows
    Csv,
    /// GraphQL executable or type-system document
    Graphql,
    /// INI configuration
    Ini,
    /// HashiCorp Configuration Language (Terraform and friends)
    Hcl,
    /// Protobuf text format, decoded as `google.protobuf.Any`
    Protobuf,
    /// CommonMark Markdown
    Markdown,
    /// JSON Lines / NDJSON, one JSON value per line
    Jsonl,
    /// Jupyter notebook (`.ipynb`)
    Jupyter,
    /// pip `requirements.txt`
    Requirements,
    /// Dockerfile / Containerfile
    Dockerfile,
    /// Request automatic detection
    Auto,
    /// Detection failed or the format is not supported
    Unknown,
}

impl Format {
    /// Every concrete (validatable) format, in declaration order.
    pub const SUPPORTED: [Format; 14] = [
        Format::Json,
        Format::Yaml,
        Format::Xml,
        Format::Toml,
        Format::Csv,
        Format::Graphql,
        Format::Ini,
        Format::Hcl,
        Format::Protobuf,
        Format::Markdown,
        Format::Jsonl,
        Format::Jupyter,
        Format::Requirements,
        Format::Dockerfile,
    ];

    /// Returns `true` for every format except the `Auto` and `Unknown`
    /// sentinels.
    #[must_use]
    pub fn is_concrete(self) -> bool {
        !matches!(self, Format::Auto | Format::Unknown)
    }

    /// Canonical lower-case name, as used by `Display`, `FromStr` and serde.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Xml => "xml",
            Format::Toml => "toml",
            Format::Csv => "csv",
            Format::Graphql => "graphql",
            Format::Ini => "ini",
            Format::Hcl => "hcl",
            Format::Protobuf => "protobuf",
            Format::Markdown => "markdown",
            Format::Jsonl => "jsonl",
            Format::Jupyter => "jupyter",
            Format::Requirements => "requirements",
            Format::Dockerfile => "dockerfile",
            Format::Auto => "auto",
            Format::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = ValidatorError;

    /// Parse a canonical format name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::SUPPORTED
            .iter()
            .chain([Format::Auto, Format::Unknown].iter())
            .copied()
            .find(|format| format.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidatorError::UnknownFormatName(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// All variants must round-trip through Display and FromStr.
    #[test]
    fn display_and_parse_all_variants() {
        let variants = [
            (Format::Json, "json"),
            (Format::Yaml, "yaml"),
            (Format::Xml, "xml"),
            (Format::Toml, "toml"),
            (Format::Csv, "csv"),
            (Format::Graphql, "graphql"),
            (Format::Ini, "ini"),
            (Format::Hcl, "hcl"),
            (Format::Protobuf, "protobuf"),
            (Format::Markdown, "markdown"),
            (Format::Jsonl, "jsonl"),
            (Format::Jupyter, "jupyter"),
            (Format::Requirements, "requirements"),
            (Format::Dockerfile, "dockerfile"),
            (Format::Auto, "auto"),
            (Format::Unknown, "unknown"),
        ];

        for (variant, expected) in &variants {
            assert_eq!(variant.to_string(), *expected);
            assert_eq!(expected.parse::<Format>().unwrap(), *variant);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("JSON".parse::<Format>().unwrap(), Format::Json);
        assert_eq!("GraphQL".parse::<Format>().unwrap(), Format::Graphql);
        assert_eq!(" yaml ".parse::<Format>().unwrap(), Format::Yaml);
    }

    #[test]
    fn parse_rejects_unknown_names() {
        let err = "invalid".parse::<Format>().unwrap_err();
        assert!(matches!(err, ValidatorError::UnknownFormatName(ref name) if name == "invalid"));
        assert!("".parse::<Format>().is_err());
        assert!("yml".parse::<Format>().is_err(), "extensions are not format names");
    }

    #[test]
    fn sentinels_are_not_concrete() {
        for format in Format::SUPPORTED {
            assert!(format.is_concrete(), "{} should be concrete", format);
        }
        assert!(!Format::Auto.is_concrete());
        assert!(!Format::Unknown.is_concrete());
    }

    #[test]
    fn supported_has_no_duplicates() {
        let mut seen = std::collections::HashSet::new();
        for format in Format::SUPPORTED {
            assert!(seen.insert(format), "duplicate entry: {}", format);
        }
        assert_eq!(seen.len(), 14);
    }

    #[test]
    fn serde_uses_canonical_names() {
        assert_eq!(serde_json::to_string(&Format::Jsonl).unwrap(), "\"jsonl\"");
        assert_eq!(serde_json::to_string(&Format::Graphql).unwrap(), "\"graphql\"");
        let parsed: Format = serde_json::from_str("\"dockerfile\"").unwrap();
        assert_eq!(parsed, Format::Dockerfile);
    }

    /// Format must be usable as a HashMap key (requires Hash + Eq).
    #[test]
    fn usable_as_hashmap_key() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(Format::Json, "json");
        map.insert(Format::Unknown, "unknown");

        assert_eq!(map.get(&Format::Json), Some(&"json"));
        assert_eq!(map.get(&Format::Unknown), Some(&"unknown"));
    }
}
