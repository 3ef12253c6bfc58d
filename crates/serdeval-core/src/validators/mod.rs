//! Per-format parse-checks.
//!
//! Every check has the [`ParseCheck`](crate::ParseCheck) shape: it receives the
//! raw bytes and returns `Ok(())` or the parser's message. Checks hold no
//! state, so the registry can share plain function pointers.
//!
//! ## Security
//!
//! All parsing is delegated to memory-safe crates that report malformed
//! input as errors instead of panicking. No check reads files, resolves
//! includes or expands entities.

pub(crate) mod csv;
pub(crate) mod dockerfile;
pub(crate) mod graphql;
pub(crate) mod hcl;
pub(crate) mod ini;
pub(crate) mod json;
pub(crate) mod markdown;
pub(crate) mod protobuf;
pub(crate) mod requirements;
pub(crate) mod toml;
pub(crate) mod xml;
pub(crate) mod yaml;

/// Borrow the input as UTF-8, reporting the decoder's message otherwise.
pub(crate) fn text(data: &[u8]) -> Result<&str, String> {
    std::str::from_utf8(data).map_err(|e| e.to_string())
}

/// Physical lines paired with their 1-based line number.
pub(crate) fn numbered_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split('\n').enumerate().map(|(i, line)| (i + 1, line))
}
