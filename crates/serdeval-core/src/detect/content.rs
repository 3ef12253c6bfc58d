//! Content-based format detection.
//!
//! Classification runs a fixed cascade of heuristic predicates over the
//! trimmed text. Families are tried from the most structurally constrained
//! (JSON) to the most permissive (TOML), and the first predicate that
//! matches decides the format. The order is what resolves ambiguous input,
//! so entries in [`CASCADE`] must never be reordered.

use std::borrow::Cow;
use std::fmt;

use crate::format::Format;

// ============================================================================
// Keyword sets
// ============================================================================

/// Dockerfile instructions that count towards the keyword threshold. Matched
/// against the upper-cased text, each with a trailing space.
const DOCKERFILE_KEYWORDS: &[&str] = &[
    "FROM ",
    "RUN ",
    "CMD ",
    "EXPOSE ",
    "ENV ",
    "ADD ",
    "COPY ",
    "ENTRYPOINT ",
    "VOLUME ",
    "USER ",
    "WORKDIR ",
    "ARG ",
];

/// Minimum number of distinct [`DOCKERFILE_KEYWORDS`] for a buffer without a
/// `FROM ` to still count as a Dockerfile.
const DOCKERFILE_KEYWORD_THRESHOLD: usize = 3;

/// Top-level HCL block types.
const HCL_KEYWORDS: &[&str] = &[
    "resource ",
    "variable ",
    "provider ",
    "module ",
    "output ",
    "locals ",
    "terraform ",
    "data ",
];

/// GraphQL operation and type-system keywords.
const GRAPHQL_KEYWORDS: &[&str] = &[
    "query ",
    "mutation ",
    "subscription ",
    "fragment ",
    "type ",
    "interface ",
    "enum ",
    "input ",
    "scalar ",
    "schema ",
];

/// Field names of `google.protobuf.Any` in text format.
const PROTOBUF_FIELDS: &[&str] = &["type_url:", "value:"];

/// pip version specifiers.
const REQUIREMENT_OPERATORS: &[&str] = &["==", ">=", "<=", "~="];

/// Number of leading lines compared by the CSV column-count check.
const CSV_SAMPLE_LINES: usize = 5;

// ============================================================================
// Preprocessing
// ============================================================================

/// The call-local view of a buffer that every predicate inspects: the
/// whitespace-trimmed text and that text split on `\n`.
pub(crate) struct Sample<'a> {
    text: &'a str,
    lines: Vec<&'a str>,
}

impl<'a> Sample<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            text,
            lines: text.split('\n').collect(),
        }
    }

    fn contains(&self, needle: &str) -> bool {
        self.text.contains(needle)
    }

    fn contains_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.text.contains(n))
    }

    fn first_line(&self) -> &'a str {
        self.lines.first().copied().unwrap_or("")
    }

    /// Trimmed lines with blank ones removed.
    fn content_lines(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.lines
            .iter()
            .copied()
            .map(str::trim)
            .filter(|line| !line.is_empty())
    }
}

/// Decode lossily so detection never fails on invalid UTF-8.
fn decode(data: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(data)
}

// ============================================================================
// JSON family
// ============================================================================

/// A line or document wholly wrapped in `{...}` or `[...]`.
fn is_wrapped_json(text: &str) -> bool {
    (text.starts_with('{') && text.ends_with('}'))
        || (text.starts_with('[') && text.ends_with(']'))
}

pub(crate) fn is_jupyter(sample: &Sample<'_>) -> bool {
    sample.text.starts_with('{')
        && sample.contains("\"cells\"")
        && sample.contains("\"metadata\"")
        && sample.contains("\"nbformat\"")
}

/// All-or-nothing: one non-blank line that is not a JSON container rejects
/// the whole buffer, and a single qualifying line is plain JSON.
pub(crate) fn is_json_lines(sample: &Sample<'_>) -> bool {
    if sample.lines.len() <= 1 {
        return false;
    }

    let mut qualifying = 0usize;
    for line in sample.content_lines() {
        if !is_wrapped_json(line) {
            return false;
        }
        qualifying += 1;
    }
    qualifying > 1
}

pub(crate) fn is_json(sample: &Sample<'_>) -> bool {
    is_wrapped_json(sample.text)
}

// ============================================================================
// Developer/config formats
// ============================================================================

pub(crate) fn is_dockerfile(sample: &Sample<'_>) -> bool {
    let upper = sample.text.to_uppercase();
    if upper.contains("FROM ") {
        return true;
    }

    DOCKERFILE_KEYWORDS
        .iter()
        .filter(|keyword| upper.contains(*keyword))
        .count()
        >= DOCKERFILE_KEYWORD_THRESHOLD
}

pub(crate) fn is_hcl(sample: &Sample<'_>) -> bool {
    sample.contains_any(HCL_KEYWORDS)
        && sample.contains("=")
        && sample.contains("\"")
        && sample.contains("{")
}

/// The brace-layout guard keeps a bare JSON-ish object that merely mentions
/// `type ` from matching.
pub(crate) fn is_graphql(sample: &Sample<'_>) -> bool {
    let hits = GRAPHQL_KEYWORDS
        .iter()
        .filter(|keyword| sample.contains(keyword))
        .count();
    if hits == 0 || !sample.contains("{") || !sample.contains("}") {
        return false;
    }

    sample.contains("{\n") || sample.contains("{ ") || hits >= 2
}

pub(crate) fn is_protobuf_text(sample: &Sample<'_>) -> bool {
    sample.contains_any(PROTOBUF_FIELDS) && sample.contains("\"")
}

// ============================================================================
// Data/document formats
// ============================================================================

pub(crate) fn is_csv(sample: &Sample<'_>) -> bool {
    if !sample.contains(",") || sample.lines.len() <= 1 {
        return false;
    }

    let columns = sample.first_line().matches(',').count();
    if columns == 0 {
        return false;
    }

    sample
        .lines
        .iter()
        .take(CSV_SAMPLE_LINES)
        .filter(|line| !line.trim().is_empty())
        .all(|line| line.matches(',').count() == columns)
}

pub(crate) fn is_markdown(sample: &Sample<'_>) -> bool {
    sample.first_line().starts_with('#')
        || sample.contains("```")
        || sample.contains("**")
        || sample.contains("~~")
        || (sample.contains("[") && sample.contains("]("))
}

pub(crate) fn is_requirements(sample: &Sample<'_>) -> bool {
    sample.contains_any(REQUIREMENT_OPERATORS)
        && sample
            .content_lines()
            .filter(|line| !line.starts_with('#'))
            .any(|line| line.chars().any(|c| c.is_ascii_lowercase()))
}

// ============================================================================
// Config/markup formats
// ============================================================================

pub(crate) fn is_xml(sample: &Sample<'_>) -> bool {
    sample.text.starts_with("<?xml") || (sample.text.starts_with('<') && sample.contains(">"))
}

pub(crate) fn is_ini(sample: &Sample<'_>) -> bool {
    sample.contains("[")
        && sample.contains("]")
        && sample
            .content_lines()
            .any(|line| line.starts_with('[') && line.ends_with(']'))
}

/// `type_url:` / `value:` lines belong to protobuf text, not YAML.
fn has_protobuf_field_line(sample: &Sample<'_>) -> bool {
    sample
        .content_lines()
        .any(|line| PROTOBUF_FIELDS.iter().any(|field| line.starts_with(field)))
}

pub(crate) fn is_yaml(sample: &Sample<'_>) -> bool {
    if sample.contains("---") {
        return true;
    }

    sample.contains(":")
        && !sample.contains("://")
        && !has_protobuf_field_line(sample)
        && (sample.contains(": ") || sample.text.ends_with(':'))
}

pub(crate) fn is_toml(sample: &Sample<'_>) -> bool {
    sample.contains("=")
        && !sample.contains(":")
        && !sample.text.starts_with(['{', '[', '<'])
}

// ============================================================================
// Cascade
// ============================================================================

/// A group of formats tried together; later families run only when every
/// earlier one found nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Family {
    Json,
    Developer,
    Document,
    Markup,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Family::Json => "json",
            Family::Developer => "developer",
            Family::Document => "document",
            Family::Markup => "markup",
        })
    }
}

type Predicate = fn(&Sample<'_>) -> bool;

/// One step of the cascade.
pub(crate) struct Rule {
    pub(crate) family: Family,
    pub(crate) format: Format,
    matches: Predicate,
}

const fn rule(family: Family, format: Format, matches: Predicate) -> Rule {
    Rule {
        family,
        format,
        matches,
    }
}

/// The detection cascade, in precedence order.
pub(crate) const CASCADE: &[Rule] = &[
    // Jupyter before JSON-Lines before JSON: a notebook's opening brace
    // would otherwise match plain JSON.
    rule(Family::Json, Format::Jupyter, is_jupyter),
    rule(Family::Json, Format::Jsonl, is_json_lines),
    rule(Family::Json, Format::Json, is_json),
    rule(Family::Developer, Format::Dockerfile, is_dockerfile),
    rule(Family::Developer, Format::Hcl, is_hcl),
    rule(Family::Developer, Format::Graphql, is_graphql),
    rule(Family::Developer, Format::Protobuf, is_protobuf_text),
    rule(Family::Document, Format::Csv, is_csv),
    rule(Family::Document, Format::Markdown, is_markdown),
    rule(Family::Document, Format::Requirements, is_requirements),
    rule(Family::Markup, Format::Xml, is_xml),
    rule(Family::Markup, Format::Ini, is_ini),
    rule(Family::Markup, Format::Yaml, is_yaml),
    rule(Family::Markup, Format::Toml, is_toml),
];

fn classify(sample: &Sample<'_>) -> Option<&'static Rule> {
    CASCADE.iter().find(|rule| {
        let matched = (rule.matches)(sample);
        if !matched {
            tracing::trace!(family = %rule.family, format = %rule.format, "rule rejected");
        }
        matched
    })
}

// ============================================================================
// Public entry point
// ============================================================================

/// Detect the format of `data` by inspecting its content.
///
/// Returns [`Format::Unknown`] for empty or whitespace-only input and when
/// no heuristic matches. Never panics; invalid UTF-8 is decoded lossily.
///
/// # Examples
///
/// ```
/// use serdeval_core::{Format, detect_format};
///
/// assert_eq!(detect_format(br#"{"a":1}"#), Format::Json);
/// assert_eq!(detect_format(b"{\"a\":1}\n{\"b\":2}"), Format::Jsonl);
/// assert_eq!(detect_format(b"FROM ubuntu:20.04\nRUN x"), Format::Dockerfile);
/// assert_eq!(detect_format(b"   "), Format::Unknown);
/// ```
pub fn detect_format(data: &[u8]) -> Format {
    let decoded = decode(data);
    let text = decoded.trim();
    if text.is_empty() {
        tracing::debug!(bytes = data.len(), "empty input, format unknown");
        return Format::Unknown;
    }

    let sample = Sample::new(text);
    match classify(&sample) {
        Some(rule) => {
            tracing::debug!(
                family = %rule.family,
                format = %rule.format,
                bytes = data.len(),
                "content detected"
            );
            rule.format
        }
        None => {
            tracing::debug!(bytes = data.len(), "no detection rule matched");
            Format::Unknown
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn detect_never_panics(data in proptest::collection::vec(any::<u8>(), 0..512)) {
            let _ = detect_format(&data);
        }

        #[test]
        fn detect_is_pure(content in ".*") {
            prop_assert_eq!(detect_format(content.as_bytes()), detect_format(content.as_bytes()));
        }

        #[test]
        fn surrounding_whitespace_never_changes_result(
            content in "[ -~]{0,80}",
            pad in "[ \t\n]{0,4}"
        ) {
            let padded = format!("{pad}{content}{pad}");
            prop_assert_eq!(detect_format(padded.as_bytes()), detect_format(content.as_bytes()));
        }
    }
}
