//! INI check via `rust-ini`.

use super::text;

pub(crate) fn check(data: &[u8]) -> Result<(), String> {
    ::ini::Ini::load_from_str(text(data)?)
        .map(drop)
        .map_err(|e| e.to_string())
}
