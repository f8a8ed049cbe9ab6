#![no_main]

use arbitrary::Arbitrary;
use fivestar_customer_id::clocksource::ClockSource;
use fivestar_customer_id::entropy::FixedEntropy;
use fivestar_customer_id::{Generator, decode_payload, verify};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    timestamp: u64,
    entropy: [u8; 9],
    client_id: String,
    other_client_id: String,
    flip_position: u8,
    flip_symbol: u8,
}

const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

fuzz_target!(|input: FuzzInput| {
    let generator = Generator::builder()
        .clock(ClockSource::new_mock(input.timestamp))
        .entropy(Box::new(FixedEntropy::new(&input.entropy)))
        .build();

    let customer_id = generator.generate(&input.client_id).unwrap();
    assert_eq!(customer_id.len(), 26);

    // Round trip recovers what went in
    let payload = decode_payload(&customer_id, &input.client_id).unwrap();
    assert_eq!(payload.timestamp_millis(), input.timestamp & ((1 << 48) - 1));
    assert_eq!(payload.entropy(), input.entropy);

    // Identical client ids share a key
    if input.other_client_id == input.client_id {
        assert!(verify(&customer_id, &input.other_client_id));
    }

    // The last two symbols carry only tag and padding bits, so substituting either never
    // verifies
    let position = 24 + input.flip_position as usize % 2;
    let symbol = ALPHABET[input.flip_symbol as usize % 32];
    let mut tampered = customer_id.into_bytes();
    if tampered[position] != symbol {
        tampered[position] = symbol;
        let tampered = String::from_utf8(tampered).unwrap();
        assert!(!verify(&tampered, &input.client_id));
    }
});
