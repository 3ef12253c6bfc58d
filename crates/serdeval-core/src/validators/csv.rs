//! CSV check: every record must have the same number of fields as the first.

use super::text;

pub(crate) fn check(data: &[u8]) -> Result<(), String> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(false)
        .from_reader(text(data)?.as_bytes());

    let mut rows = 0usize;
    for record in reader.records() {
        record.map_err(|e| e.to_string())?;
        rows += 1;
    }
    tracing::trace!(rows, "csv records parsed");
    Ok(())
}
