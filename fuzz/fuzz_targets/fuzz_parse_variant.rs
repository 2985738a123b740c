//! Fuzz target for the variant notation parser
//!
//! Feeds arbitrary byte strings to the parser to find crashes or panics.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Notation strings are short; extremely long inputs add nothing
        if input.len() > 1000 {
            return;
        }

        // The parser should never panic on any input
        let _ = varnom::parse_variant(input, true);
        let _ = varnom::parse_variant(input, false);
    }
});
