#![no_main]

// Harness: parse_no_panic
// Strategy: feed arbitrary text through every parser configuration. Errors are expected;
// panics are not.

use libfuzzer_sys::fuzz_target;
use aarc_g002_entitlement::{parse_with, ParserConfig};

fuzz_target!(|raw: &str| {
    for config in [
        ParserConfig::strict(),
        ParserConfig::lenient(),
        ParserConfig::strict().with_percent_decode(true).with_require_group_authority(true),
        ParserConfig::lenient().with_percent_decode(true),
    ] {
        let _ = parse_with(raw, &config);
    }
});
