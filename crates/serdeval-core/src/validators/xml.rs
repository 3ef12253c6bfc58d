//! XML well-formedness check over the `quick-xml` event stream.
//!
//! The document must contain a root element and every opened element must
//! be closed with a matching name. Attributes must be quoted, valued and
//! unique, and entity references must name a predefined entity or a valid
//! character. Nothing after the root element is inspected beyond
//! tokenization.

use quick_xml::Reader;
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesRef, BytesStart, Event};

use super::text;

pub(crate) fn check(data: &[u8]) -> Result<(), String> {
    let mut reader = Reader::from_str(text(data)?);
    reader.config_mut().check_end_names = true;

    let mut depth: usize = 0;
    let mut seen_root = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(tag)) => {
                check_attributes(&reader, &tag)?;
                depth += 1;
                seen_root = true;
            }
            Ok(Event::Empty(tag)) => {
                check_attributes(&reader, &tag)?;
                seen_root = true;
            }
            Ok(Event::End(_)) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| position_error(&reader, "unexpected closing tag"))?;
            }
            Ok(Event::Text(content)) => {
                let raw = content.decode().map_err(|e| position_error(&reader, e))?;
                unescape(&raw).map_err(|e| position_error(&reader, e))?;
            }
            Ok(Event::GeneralRef(reference)) => check_reference(&reader, &reference)?,
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(format!(
                    "error at position {}: {}",
                    reader.error_position(),
                    e
                ));
            }
        }
    }

    if !seen_root {
        return Err("XML document has no root element".to_string());
    }
    if depth > 0 {
        return Err(format!(
            "unexpected end of document: {} unclosed element(s)",
            depth
        ));
    }
    Ok(())
}

/// `quick-xml` splits attributes lazily, so syntax errors only surface when
/// they are iterated.
fn check_attributes(reader: &Reader<&[u8]>, tag: &BytesStart<'_>) -> Result<(), String> {
    let mut attributes = tag.attributes();
    attributes.with_checks(true);
    for attribute in attributes {
        let attribute = attribute.map_err(|e| position_error(reader, e))?;
        attribute
            .decode_and_unescape_value(reader.decoder())
            .map_err(|e| position_error(reader, e))?;
    }
    Ok(())
}

fn check_reference(reader: &Reader<&[u8]>, reference: &BytesRef<'_>) -> Result<(), String> {
    if reference.is_char_ref() {
        reference
            .resolve_char_ref()
            .map_err(|e| position_error(reader, e))?;
        return Ok(());
    }
    let name = reference.decode().map_err(|e| position_error(reader, e))?;
    match resolve_predefined_entity(&name) {
        Some(_) => Ok(()),
        None => Err(position_error(
            reader,
            format!("undefined entity reference &{};", name),
        )),
    }
}

/// Errors found after an event was read point at the end of that event.
fn position_error(reader: &Reader<&[u8]>, message: impl std::fmt::Display) -> String {
    format!("error at position {}: {}", reader.buffer_position(), message)
}
