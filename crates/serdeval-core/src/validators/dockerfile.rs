//! Dockerfile instruction check.

use super::{numbered_lines, text};

/// Instructions a logical line may start with, upper-case.
const INSTRUCTIONS: &[&str] = &[
    "FROM",
    "RUN",
    "CMD",
    "LABEL",
    "EXPOSE",
    "ENV",
    "ADD",
    "COPY",
    "ENTRYPOINT",
    "VOLUME",
    "USER",
    "WORKDIR",
    "ARG",
    "ONBUILD",
    "STOPSIGNAL",
    "HEALTHCHECK",
    "SHELL",
];

fn starts_with_instruction(upper: &str) -> bool {
    INSTRUCTIONS.iter().any(|instruction| {
        upper == *instruction
            || upper
                .strip_prefix(instruction)
                .is_some_and(|rest| rest.starts_with(' '))
    })
}

/// Every non-comment line must start with a known instruction unless it
/// continues the previous physical line, and at least one line must be a
/// `FROM`.
pub(crate) fn check(data: &[u8]) -> Result<(), String> {
    let mut has_from = false;
    let mut continues_previous = false;

    for (number, raw) in numbered_lines(text(data)?) {
        let is_continuation = continues_previous;
        continues_previous = raw.trim_end().ends_with('\\');

        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let upper = line.to_uppercase();
        if upper.starts_with("FROM ") {
            has_from = true;
        }
        if is_continuation {
            continue;
        }
        if !starts_with_instruction(&upper) {
            return Err(format!("invalid instruction on line {}: {}", number, line));
        }
    }

    if !has_from {
        return Err("missing required FROM instruction".to_string());
    }
    Ok(())
}
