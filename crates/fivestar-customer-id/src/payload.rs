//! The unmasked 128-bit structure behind a customer identifier.

use std::fmt::{Debug, Formatter};

use data_encoding::HEXLOWER;

use crate::key::MaskingKey;

/// Size of a payload in bytes
pub const PAYLOAD_LEN: usize = 16;

/// Bytes of big-endian millisecond timestamp at the start of the payload
pub const TIMESTAMP_LEN: usize = 6;

/// Bytes of random entropy following the timestamp
pub const ENTROPY_LEN: usize = 9;

/// Bytes covered by the integrity tag
pub const BODY_LEN: usize = TIMESTAMP_LEN + ENTROPY_LEN;

/// Largest timestamp that fits in 48 bits, in the year 10889
pub const MAX_TIMESTAMP: u64 = (1 << 48) - 1;

/// `timestamp (48 bits) || entropy (72 bits) || integrity tag (8 bits)`
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Payload([u8; PAYLOAD_LEN]);

impl Payload {
    /// Assemble a payload and compute its integrity tag. Timestamps wider than 48 bits are
    /// truncated to their low 48 bits.
    pub fn new(timestamp_millis: u64, entropy: [u8; ENTROPY_LEN]) -> Self {
        let mut bytes = [0u8; PAYLOAD_LEN];
        let timestamp = (timestamp_millis & MAX_TIMESTAMP).to_be_bytes();

        bytes[..TIMESTAMP_LEN].copy_from_slice(&timestamp[8 - TIMESTAMP_LEN..]);
        bytes[TIMESTAMP_LEN..BODY_LEN].copy_from_slice(&entropy);
        bytes[BODY_LEN] = integrity_tag(&bytes[..BODY_LEN]);

        Payload(bytes)
    }

    /// Recover a candidate payload from masked bytes. The result is not checked, see
    /// [`Payload::has_valid_tag`].
    pub fn unmask(masked: &[u8; PAYLOAD_LEN], key: &MaskingKey) -> Self {
        Payload(key.apply(masked))
    }

    pub fn mask(&self, key: &MaskingKey) -> [u8; PAYLOAD_LEN] {
        key.apply(&self.0)
    }

    pub fn timestamp_millis(&self) -> u64 {
        let mut buf = [0u8; 8];
        buf[8 - TIMESTAMP_LEN..].copy_from_slice(&self.0[..TIMESTAMP_LEN]);
        u64::from_be_bytes(buf)
    }

    pub fn entropy(&self) -> [u8; ENTROPY_LEN] {
        let mut entropy = [0u8; ENTROPY_LEN];
        entropy.copy_from_slice(&self.0[TIMESTAMP_LEN..BODY_LEN]);
        entropy
    }

    pub fn tag(&self) -> u8 {
        self.0[BODY_LEN]
    }

    /// Recompute the tag over the first 120 bits and compare it with the embedded tag.
    pub fn has_valid_tag(&self) -> bool {
        // Single byte compare, no data-dependent early exit
        (integrity_tag(&self.0[..BODY_LEN]) ^ self.tag()) == 0
    }

    pub fn as_bytes(&self) -> &[u8; PAYLOAD_LEN] {
        &self.0
    }
}

impl Debug for Payload {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Payload(ts={}, entropy={}, tag={:#04x})",
            self.timestamp_millis(),
            HEXLOWER.encode(&self.entropy()),
            self.tag()
        )
    }
}

impl From<[u8; PAYLOAD_LEN]> for Payload {
    fn from(bytes: [u8; PAYLOAD_LEN]) -> Self {
        Payload(bytes)
    }
}

impl AsRef<[u8]> for Payload {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// CRC32C of `body` passed through a 32-bit finalizer, low byte.
///
/// A CRC alone is affine over GF(2): XOR-ing a foreign masking key into the payload would then
/// shift the tag by a constant, and a client pair would either accept all of each other's
/// identifiers or none. The multiplications break that, so a wrong key matches the tag for
/// about one payload in 256, independently per payload.
pub fn integrity_tag(body: &[u8]) -> u8 {
    let mut h = crc32c::crc32c(body);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h as u8
}
