//! Protocol Buffers text-format check.
//!
//! The input is parsed as a `google.protobuf.Any` message, so only the
//! `type_url` and `value` fields are accepted.

use prost_reflect::{DynamicMessage, ReflectMessage};

use super::text;

pub(crate) fn check(data: &[u8]) -> Result<(), String> {
    let descriptor = prost_types::Any::default().descriptor();
    DynamicMessage::parse_text_format(descriptor, text(data)?)
        .map(drop)
        .map_err(|e| e.to_string())
}
