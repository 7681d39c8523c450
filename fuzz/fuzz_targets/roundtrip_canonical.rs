#![no_main]

// Harness: roundtrip_canonical
// Strategy: anything that parses must reparse, in the same mode, from its canonical string
// to an equal value.

use libfuzzer_sys::fuzz_target;
use arbitrary::Arbitrary;
use aarc_g002_entitlement::{parse, ParseMode};

#[derive(Arbitrary, Debug)]
struct Input {
    lenient: bool,
    tail: String,
}

fuzz_target!(|input: Input| {
    let mode = if input.lenient { ParseMode::Lenient } else { ParseMode::Strict };
    let raw = format!("urn:geant:{}", input.tail);
    if let Ok(entitlement) = parse(&raw, mode) {
        let canonical = entitlement.to_canonical_string();
        assert_eq!(parse(&canonical, mode), Ok(entitlement));
    }
});
