//! YAML check. Every document in a multi-document stream must parse.

use serde::Deserialize;

use super::text;

pub(crate) fn check(data: &[u8]) -> Result<(), String> {
    for document in serde_yaml::Deserializer::from_str(text(data)?) {
        serde_yaml::Value::deserialize(document).map_err(|e| e.to_string())?;
    }
    Ok(())
}
