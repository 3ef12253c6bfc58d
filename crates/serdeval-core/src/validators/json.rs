//! JSON, JSON Lines and Jupyter notebook checks, all backed by `serde_json`.

use serde::de::IgnoredAny;
use serde_json::{Map, Value};

use super::{numbered_lines, text};

/// Top-level keys a notebook must carry, in the order they are checked.
const NOTEBOOK_FIELDS: &[&str] = &["cells", "metadata", "nbformat"];

/// A single JSON document of any shape.
pub(crate) fn check(data: &[u8]) -> Result<(), String> {
    serde_json::from_slice::<IgnoredAny>(data)
        .map(drop)
        .map_err(|e| e.to_string())
}

/// Newline-delimited JSON. Blank lines are skipped and empty input is valid.
pub(crate) fn check_lines(data: &[u8]) -> Result<(), String> {
    if data.is_empty() {
        return Ok(());
    }

    for (number, line) in numbered_lines(text(data)?) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Err(e) = serde_json::from_str::<IgnoredAny>(line) {
            tracing::trace!(line = number, "jsonl line rejected");
            return Err(format!("invalid JSON on line {}: {}", number, e));
        }
    }
    Ok(())
}

/// A JSON object carrying the notebook fields. Their values are not inspected.
pub(crate) fn check_notebook(data: &[u8]) -> Result<(), String> {
    let notebook: Map<String, Value> =
        serde_json::from_slice(data).map_err(|e| format!("invalid JSON: {}", e))?;

    match NOTEBOOK_FIELDS
        .iter()
        .find(|field| !notebook.contains_key(**field))
    {
        Some(missing) => Err(format!("missing required field: {}", missing)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- JSON ----

    #[test]
    fn test_json_valid_documents() {
        for input in [
            r#"{"name": "test", "value": 123}"#,
            r#"[1, 2, 3]"#,
            r#"{"nested": {"key": [true, null]}}"#,
            "42",
            r#""just a string""#,
        ] {
            assert!(check(input.as_bytes()).is_ok(), "should accept {}", input);
        }
    }

    #[test]
    fn test_json_invalid_documents() {
        for input in [r#"{"name": "test", "value": }"#, r#"{"a": 1,}"#, ""] {
            assert!(check(input.as_bytes()).is_err(), "should reject {:?}", input);
        }
    }

    #[test]
    fn test_json_error_keeps_parser_message() {
        let err = check(b"{\"a\": }").unwrap_err();
        assert!(err.contains("line 1"), "unexpected message: {}", err);
    }

    // ---- JSON Lines ----

    #[test]
    fn test_jsonl_valid() {
        let input = "{\"name\": \"John\", \"age\": 30}\n{\"name\": \"Jane\", \"age\": 25}\n";
        assert!(check_lines(input.as_bytes()).is_ok());
    }

    #[test]
    fn test_jsonl_empty_input_is_valid() {
        assert!(check_lines(b"").is_ok());
    }

    #[test]
    fn test_jsonl_skips_blank_lines() {
        let input = "{\"a\": 1}\n\n   \n[2]\n";
        assert!(check_lines(input.as_bytes()).is_ok());
    }

    #[test]
    fn test_jsonl_reports_one_based_line() {
        let input = "{\"name\": \"John\"}\n{\"name\": }\n";
        let err = check_lines(input.as_bytes()).unwrap_err();
        assert!(
            err.starts_with("invalid JSON on line 2: "),
            "unexpected message: {}",
            err
        );
    }

    #[test]
    fn test_jsonl_line_number_counts_blank_lines() {
        let input = "{\"a\": 1}\n\nnot json\n";
        let err = check_lines(input.as_bytes()).unwrap_err();
        assert!(err.starts_with("invalid JSON on line 3: "), "{}", err);
    }

    // ---- Jupyter ----

    #[test]
    fn test_notebook_valid() {
        let input = r#"{"cells": [], "metadata": {}, "nbformat": 4, "nbformat_minor": 4}"#;
        assert!(check_notebook(input.as_bytes()).is_ok());
    }

    #[test]
    fn test_notebook_missing_fields_in_order() {
        let cases = [
            (r#"{"metadata": {}, "nbformat": 4}"#, "cells"),
            (r#"{"cells": [], "nbformat": 4}"#, "metadata"),
            (r#"{"cells": [], "metadata": {}}"#, "nbformat"),
            (r#"{}"#, "cells"),
        ];
        for (input, field) in cases {
            assert_eq!(
                check_notebook(input.as_bytes()),
                Err(format!("missing required field: {}", field)),
                "input: {}",
                input
            );
        }
    }

    #[test]
    fn test_notebook_invalid_json() {
        let err = check_notebook(b"{\"cells\": [").unwrap_err();
        assert!(err.starts_with("invalid JSON: "), "{}", err);
    }

    #[test]
    fn test_notebook_must_be_object() {
        let err = check_notebook(b"[1, 2]").unwrap_err();
        assert!(err.starts_with("invalid JSON: "), "{}", err);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn checks_never_panic(content in ".*") {
            let _ = check(content.as_bytes());
            let _ = check_lines(content.as_bytes());
            let _ = check_notebook(content.as_bytes());
        }

        #[test]
        fn generated_lines_are_valid(
            values in prop::collection::vec(("[a-z]{1,8}", any::<i64>()), 0..10)
        ) {
            let input: String = values
                .iter()
                .map(|(k, v)| format!("{{\"{}\": {}}}\n", k, v))
                .collect();
            prop_assert!(check_lines(input.as_bytes()).is_ok());
        }
    }
}
