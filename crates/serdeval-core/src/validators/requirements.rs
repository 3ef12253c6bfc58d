//! pip requirements check.
//!
//! Only the presence of a package-name character is enforced per line;
//! version specifiers, markers and options are not interpreted.

use std::sync::OnceLock;

use regex::Regex;

use super::{numbered_lines, text};

static NAME_CHAR: OnceLock<Regex> = OnceLock::new();

fn name_char() -> &'static Regex {
    NAME_CHAR.get_or_init(|| Regex::new(r"[A-Za-z0-9_-]").expect("static pattern compiles"))
}

pub(crate) fn check(data: &[u8]) -> Result<(), String> {
    for (number, line) in numbered_lines(text(data)?) {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if !name_char().is_match(line) {
            return Err(format!("invalid requirement on line {}: {}", number, line));
        }
    }
    Ok(())
}
