//! Markdown check. CommonMark has no invalid documents, so this only drives
//! the parser to completion.

use pulldown_cmark::{Options, Parser};

pub(crate) fn check(data: &[u8]) -> Result<(), String> {
    let text = String::from_utf8_lossy(data);
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let events = Parser::new_ext(&text, options).count();
    tracing::trace!(events, "markdown parsed");
    Ok(())
}
