//! TOML check.

use super::text;

pub(crate) fn check(data: &[u8]) -> Result<(), String> {
    ::toml::from_str::<::toml::Table>(text(data)?)
        .map(drop)
        .map_err(|e| e.to_string())
}
