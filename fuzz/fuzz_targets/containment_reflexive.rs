#![no_main]

// Harness: containment_reflexive
// Strategy: every parsed entitlement contains itself, and equal values contain each other.

use libfuzzer_sys::fuzz_target;
use aarc_g002_entitlement::{is_contained_in, parse, ParseMode};

fuzz_target!(|tail: &str| {
    let raw = format!("urn:geant:{tail}");
    if let Ok(entitlement) = parse(&raw, ParseMode::Lenient) {
        assert!(is_contained_in(&entitlement, &entitlement));
        let copy = entitlement.clone();
        assert!(is_contained_in(&copy, &entitlement) && is_contained_in(&entitlement, &copy));
    }
});
