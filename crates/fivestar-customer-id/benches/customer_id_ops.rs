use divan::{Bencher, black_box, black_box_drop};
use fivestar_customer_id::clocksource::ClockSource;
use fivestar_customer_id::entropy::FixedEntropy;
use fivestar_customer_id::key::derive_key;
use fivestar_customer_id::{Generator, base32, decode, generate, is_valid_format, verify};

fn main() {
    divan::main();
}

const CLIENT_ID: &str = "bench-client-0001";

fn fixed_generator() -> Generator {
    Generator::builder()
        .clock(ClockSource::new_mock(1_700_000_000_000))
        .entropy(Box::new(FixedEntropy::new(&[0x42])))
        .build()
}

#[divan::bench(min_time = 0.250)]
fn derive(bencher: Bencher) {
    bencher.bench(|| derive_key(black_box(CLIENT_ID)))
}

mod codec {
    use super::*;

    #[divan::bench(min_time = 0.250)]
    fn encode(bencher: Bencher) {
        let bytes = [0xa5u8; 16];
        bencher.bench(|| base32::encode(black_box(&bytes)))
    }

    #[divan::bench(min_time = 0.250)]
    fn decode(bencher: Bencher) {
        bencher.bench(|| base32::decode(black_box("065WZSB801144GJ289144GJ2VW")))
    }
}

mod customer_id {
    use super::*;

    #[divan::bench(min_time = 0.250)]
    fn generate_system_entropy(bencher: Bencher) {
        bencher.bench(|| black_box_drop(generate(black_box(CLIENT_ID))))
    }

    #[divan::bench(min_time = 0.250)]
    fn generate_fixed_entropy(bencher: Bencher) {
        let generator = fixed_generator();
        bencher.bench_local(|| black_box_drop(generator.generate(black_box(CLIENT_ID))))
    }

    #[divan::bench(min_time = 0.250)]
    fn verify_valid(bencher: Bencher) {
        let customer_id = fixed_generator().generate(CLIENT_ID).unwrap();
        bencher.bench(|| verify(black_box(&customer_id), black_box(CLIENT_ID)))
    }

    #[divan::bench(min_time = 0.250)]
    fn verify_malformed(bencher: Bencher) {
        bencher.bench(|| verify(black_box("0I23456789ABCDEFGHJKMNPQRS"), black_box(CLIENT_ID)))
    }

    #[divan::bench(min_time = 0.250)]
    fn decode_valid(bencher: Bencher) {
        let customer_id = fixed_generator().generate(CLIENT_ID).unwrap();
        bencher.bench(|| decode(black_box(&customer_id), black_box(CLIENT_ID)))
    }

    #[divan::bench(min_time = 0.250)]
    fn format_check(bencher: Bencher) {
        bencher.bench(|| is_valid_format(black_box("0123456789ABCDEFGHJKMNPQRS")))
    }
}
