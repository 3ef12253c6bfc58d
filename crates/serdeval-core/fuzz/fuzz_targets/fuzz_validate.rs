//! Fuzz target for the parse-checks
//!
//! Every supported format's validator runs on the same input. Parsers must
//! report malformed data as an invalid outcome, never panic.
//!
//! Properties validated:
//! - No panics from any parse-check
//! - Invalid outcomes always carry a message
//! - validate_auto never reports a sentinel other than `unknown`

#![no_main]

use libfuzzer_sys::fuzz_target;
use serdeval_core::{Format, new_validator, validate_auto};

fuzz_target!(|data: &[u8]| {
    for format in Format::SUPPORTED {
        if let Ok(validator) = new_validator(format) {
            let outcome = validator.validate(data);
            assert_eq!(outcome.valid, outcome.error.is_none());
        }
    }

    let outcome = validate_auto(data);
    assert_ne!(outcome.format, Format::Auto);
});
