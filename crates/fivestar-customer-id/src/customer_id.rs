//! Generate, verify, and decode customer identifiers.
//!
//! Only [`generate`] can fail, and only when the secure random source does. [`verify`],
//! [`decode`], and [`is_valid_format`] are total: malformed input, a token minted for another
//! client, and a corrupted token all produce the same negative answer.

use tracing::trace;

use crate::base32;
use crate::clocksource::ClockSource;
use crate::entropy::{EntropySource, SystemEntropy};
use crate::error::Error;
use crate::key::derive_key;
use crate::payload::{ENTROPY_LEN, Payload};

/// Generate a new customer identifier for `client_id` using the system clock and the system
/// CSPRNG.
///
/// ```
/// let customer_id = fivestar_customer_id::generate("test-client-123").unwrap();
/// assert_eq!(customer_id.len(), 26);
/// ```
pub fn generate(client_id: &str) -> Result<String, Error> {
    Generator::new().generate(client_id)
}

/// True iff `customer_id` is well-formed and was minted for `client_id`.
pub fn verify(customer_id: &str, client_id: &str) -> bool {
    decode_payload(customer_id, client_id).is_some()
}

/// The unmasked payload of `customer_id` re-encoded as 26 characters, or `None` if
/// `customer_id` does not verify for `client_id`.
///
/// The result does not depend on the client key, so it is useful for log correlation.
pub fn decode(customer_id: &str, client_id: &str) -> Option<String> {
    decode_payload(customer_id, client_id).map(|payload| base32::encode(payload.as_bytes()))
}

/// The unmasked [`Payload`] of `customer_id`, or `None` if it does not verify for `client_id`.
pub fn decode_payload(customer_id: &str, client_id: &str) -> Option<Payload> {
    let masked = match base32::decode(customer_id) {
        Ok(masked) => masked,
        Err(e) => {
            trace!("customer id rejected: {e}");
            return None;
        }
    };

    let payload = Payload::unmask(&masked, &derive_key(client_id));

    if payload.has_valid_tag() {
        Some(payload)
    } else {
        trace!("customer id rejected: integrity tag mismatch");
        None
    }
}

/// Syntax-only check: exactly 26 characters, each in the Crockford alphabet in either case.
///
/// Does not look at padding bits or client binding. Cheap enough to run on any externally
/// supplied string before a client id is known.
pub fn is_valid_format(text: &str) -> bool {
    let bytes = text.as_bytes();

    // fold instead of all(): visit every byte regardless of where a bad one sits
    bytes.len() == base32::ENCODED_LEN
        && bytes
            .iter()
            .fold(true, |valid, &b| valid & base32::is_symbol(b))
}

/// Mints customer identifiers from an injectable clock and entropy source.
///
/// A `Generator` holds no per-call state and can be shared between threads.
pub struct Generator {
    clock: ClockSource,
    entropy: Box<dyn EntropySource>,
}

impl Generator {
    /// A generator backed by the system clock and the system CSPRNG.
    pub fn new() -> Self {
        GeneratorBuilder::new().build()
    }

    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder::new()
    }

    /// Mint a customer identifier bound to `client_id`.
    pub fn generate(&self, client_id: &str) -> Result<String, Error> {
        let payload = self.next_payload()?;
        let masked = payload.mask(&derive_key(client_id));

        Ok(base32::encode(&masked))
    }

    /// A fresh payload: current time, new entropy, and integrity tag.
    pub fn next_payload(&self) -> Result<Payload, Error> {
        let timestamp = self.clock.epoch_millis();

        let mut entropy = [0u8; ENTROPY_LEN];
        self.entropy.fill(&mut entropy)?;

        Ok(Payload::new(timestamp, entropy))
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

pub struct GeneratorBuilder {
    clock: Option<ClockSource>,
    entropy: Option<Box<dyn EntropySource>>,
}

impl GeneratorBuilder {
    pub fn new() -> Self {
        Self {
            clock: None,
            entropy: None,
        }
    }

    pub fn clock(mut self, clock: ClockSource) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn entropy(mut self, entropy: Box<dyn EntropySource>) -> Self {
        self.entropy = Some(entropy);
        self
    }

    pub fn build(self) -> Generator {
        Generator {
            clock: self.clock.unwrap_or_default(),
            entropy: self.entropy.unwrap_or_else(|| Box::new(SystemEntropy)),
        }
    }
}

impl Default for GeneratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
