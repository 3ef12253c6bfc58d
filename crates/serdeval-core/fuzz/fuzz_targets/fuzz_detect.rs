//! Fuzz target for format detection
//!
//! Properties validated:
//! - No panics on arbitrary bytes, including invalid UTF-8
//! - Detection is deterministic for identical input
//! - Filename detection never panics on arbitrary names

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let first = serdeval_core::detect_format(data);
    let second = serdeval_core::detect_format(data);
    assert_eq!(first, second);

    if let Ok(name) = std::str::from_utf8(data) {
        let _ = serdeval_core::detect_format_from_filename(name);
    }
});
