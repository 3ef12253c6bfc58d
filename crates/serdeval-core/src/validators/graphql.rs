//! GraphQL document check.
//!
//! A document may mix executable definitions (operations, fragments) with
//! type-system definitions. `graphql-parser` only parses one kind at a time,
//! so top-level definitions are split by kind first and each half is handed
//! to its own parser.

use super::text;

const EXECUTABLE_KEYWORDS: &[&str] = &["query", "mutation", "subscription", "fragment"];

const TYPE_SYSTEM_KEYWORDS: &[&str] = &[
    "type",
    "interface",
    "enum",
    "input",
    "scalar",
    "schema",
    "union",
    "directive",
    "extend",
];

/// Type-system definitions that never take a `{ ... }` body, so a following
/// brace opens an anonymous operation.
const BODYLESS_KEYWORDS: &[&str] = &["scalar", "union", "directive"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Executable,
    TypeSystem,
}

/// Last significant token seen at nesting depth zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Previous<'a> {
    Nothing,
    Name(&'a str),
    Description,
    Close,
    Punctuation,
}

pub(crate) fn check(data: &[u8]) -> Result<(), String> {
    let source = text(data)?;
    if source.trim().is_empty() {
        return Err("empty GraphQL content".to_string());
    }

    let definitions = split_definitions(source);
    let Some(&(first, _)) = definitions.first() else {
        // Comments only: let the query parser describe the missing definition.
        return parse(Kind::Executable, source);
    };

    let order = match first {
        Kind::Executable => [Kind::Executable, Kind::TypeSystem],
        Kind::TypeSystem => [Kind::TypeSystem, Kind::Executable],
    };
    for kind in order {
        if let Some(document) = mask_other_kind(source, &definitions, kind) {
            parse(kind, &document)?;
        }
    }
    Ok(())
}

fn parse(kind: Kind, document: &str) -> Result<(), String> {
    match kind {
        Kind::Executable => graphql_parser::parse_query::<&str>(document)
            .map(|_| ())
            .map_err(|e| e.to_string()),
        Kind::TypeSystem => graphql_parser::parse_schema::<&str>(document)
            .map(|_| ())
            .map_err(|e| e.to_string()),
    }
}

/// Byte offsets where top-level definitions start, tagged with their kind.
///
/// Offsets always land on ASCII token starts. Tokens nested inside braces,
/// parentheses or brackets never start a definition.
fn split_definitions(source: &str) -> Vec<(Kind, usize)> {
    let bytes = source.as_bytes();
    let mut definitions = Vec::new();
    let mut depth: usize = 0;
    let mut previous = Previous::Nothing;
    let mut bodyless = false;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'#' => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b' ' | b'\t' | b'\n' | b'\r' | b',' => i += 1,
            b'"' => {
                if depth == 0 {
                    // Descriptions only precede type-system definitions.
                    if previous != Previous::Description {
                        definitions.push((Kind::TypeSystem, i));
                        bodyless = false;
                    }
                    previous = Previous::Description;
                }
                i = skip_string(bytes, i);
            }
            b'{' | b'(' | b'[' => {
                if depth == 0 && bytes[i] == b'{' {
                    let opens_operation = definitions.is_empty()
                        || previous == Previous::Close
                        || (bodyless && previous != Previous::Nothing);
                    if opens_operation {
                        definitions.push((Kind::Executable, i));
                        bodyless = false;
                    }
                }
                depth += 1;
                i += 1;
            }
            b'}' | b')' | b']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    previous = if bytes[i] == b'}' {
                        Previous::Close
                    } else {
                        Previous::Punctuation
                    };
                }
                i += 1;
            }
            b if b == b'_' || b.is_ascii_alphabetic() => {
                let start = i;
                while i < bytes.len() && (bytes[i] == b'_' || bytes[i].is_ascii_alphanumeric()) {
                    i += 1;
                }
                if depth == 0 {
                    let name = &source[start..i];
                    let kind = definition_kind(name);
                    let continues = matches!(
                        previous,
                        Previous::Name("extend") | Previous::Description
                    );
                    match kind {
                        Some(kind) if !continues => {
                            definitions.push((kind, start));
                            bodyless = BODYLESS_KEYWORDS.contains(&name);
                        }
                        Some(_) => bodyless = BODYLESS_KEYWORDS.contains(&name),
                        None if definitions.is_empty() => {
                            definitions.push((Kind::Executable, start));
                        }
                        None => {}
                    }
                    previous = Previous::Name(name);
                }
            }
            _ => {
                if depth == 0 {
                    previous = Previous::Punctuation;
                }
                i += 1;
            }
        }
    }
    definitions
}

fn definition_kind(name: &str) -> Option<Kind> {
    if EXECUTABLE_KEYWORDS.contains(&name) {
        Some(Kind::Executable)
    } else if TYPE_SYSTEM_KEYWORDS.contains(&name) {
        Some(Kind::TypeSystem)
    } else {
        None
    }
}

/// Offset just past the string starting at `start`, block strings included.
fn skip_string(bytes: &[u8], start: usize) -> usize {
    if bytes[start..].starts_with(b"\"\"\"") {
        let mut i = start + 3;
        while i < bytes.len() {
            if bytes[i..].starts_with(b"\\\"\"\"") {
                i += 4;
            } else if bytes[i..].starts_with(b"\"\"\"") {
                return i + 3;
            } else {
                i += 1;
            }
        }
        return bytes.len();
    }

    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return i + 1,
            b'\n' => return i,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Copy of `source` with every definition of the other kind blanked out.
/// Line breaks survive, so parser positions still refer to `source`.
///
/// Returns `None` when no definition of `keep` exists.
fn mask_other_kind(source: &str, definitions: &[(Kind, usize)], keep: Kind) -> Option<String> {
    if !definitions.iter().any(|&(kind, _)| kind == keep) {
        return None;
    }

    let mut document = String::with_capacity(source.len());
    let first_start = definitions.first().map_or(source.len(), |&(_, start)| start);
    document.push_str(&source[..first_start]);

    for (index, &(kind, start)) in definitions.iter().enumerate() {
        let end = definitions
            .get(index + 1)
            .map_or(source.len(), |&(_, next)| next);
        let segment = &source[start..end];
        if kind == keep {
            document.push_str(segment);
        } else {
            document.extend(segment.chars().map(|c| match c {
                '\n' | '\r' => c,
                _ => ' ',
            }));
        }
    }
    Some(document)
}
