#![no_main]

use fivestar_customer_id::{base32, decode, is_valid_format, verify};
use libfuzzer_sys::fuzz_target;

// Arbitrary strings must never panic, and the checks must agree with each other.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let well_formed = is_valid_format(text);
    let decoded = base32::decode(text);

    if decoded.is_ok() {
        assert!(well_formed, "decoded but failed the format check: {text:?}");
    }

    let verified = verify(text, "fuzz-client");
    let canonical = decode(text, "fuzz-client");

    assert_eq!(verified, canonical.is_some());
    if verified {
        assert!(decoded.is_ok());
        assert!(is_valid_format(&canonical.unwrap()));
    }
});
