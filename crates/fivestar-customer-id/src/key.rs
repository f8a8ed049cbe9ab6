//! Per-client masking keys.

use std::fmt::{Debug, Formatter};

use aws_lc_rs::hmac;

/// HMAC key that separates masking key derivation from other uses of HMAC-SHA256 by the host
/// application. Changing it invalidates every customer id issued so far.
const DOMAIN_SEPARATOR: &[u8] = b"fivestar.support/customer-id/masking-key/v1";

/// Size of a masking key in bytes (128 bits)
pub const KEY_LEN: usize = 16;

/// Binds a payload to its owning client. Recomputed on demand from the client identifier and
/// never stored.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaskingKey([u8; KEY_LEN]);

impl MaskingKey {
    /// XOR `block` with this key. Applying the same key twice restores the original.
    pub fn apply(&self, block: &[u8; KEY_LEN]) -> [u8; KEY_LEN] {
        let mut out = *block;
        out.iter_mut().zip(self.0.iter()).for_each(|(b, k)| *b ^= k);
        out
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl Debug for MaskingKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "MaskingKey(len={})", KEY_LEN)
    }
}

impl From<[u8; KEY_LEN]> for MaskingKey {
    fn from(bytes: [u8; KEY_LEN]) -> Self {
        MaskingKey(bytes)
    }
}

/// Derive the masking key for `client_id`.
///
/// Returns `HMAC-SHA256(DOMAIN_SEPARATOR, client_id)[0:16]`. The empty string is a valid input.
pub fn derive_key(client_id: &str) -> MaskingKey {
    let key = hmac::Key::new(hmac::HMAC_SHA256, DOMAIN_SEPARATOR);
    let tag = hmac::sign(&key, client_id.as_bytes());

    let mut bytes = [0u8; KEY_LEN];
    bytes.copy_from_slice(&tag.as_ref()[..KEY_LEN]);
    MaskingKey(bytes)
}

#[cfg(test)]
mod tests {
    use data_encoding::HEXLOWER;

    use super::*;

    #[test]
    fn known_answers() {
        assert_eq!(
            HEXLOWER.encode(derive_key("test-client-123").as_bytes()),
            "0387d4bef4f9959d1579e75be4fa0477"
        );
        assert_eq!(
            HEXLOWER.encode(derive_key("").as_bytes()),
            "3c823060514a6671c24c18afe6a51a55"
        );
    }

    #[test]
    fn deterministic() {
        assert_eq!(derive_key("acme"), derive_key("acme"));
        assert_eq!(derive_key(""), derive_key(""));
    }

    #[test]
    fn single_character_change_flips_about_half_the_bits() {
        let base = derive_key("client-0000");

        let mut total_flipped = 0u32;
        let samples = 64;
        for i in 1..=samples {
            let other = derive_key(&format!("client-{i:04}"));
            let flipped: u32 = base
                .as_bytes()
                .iter()
                .zip(other.as_bytes())
                .map(|(a, b)| (a ^ b).count_ones())
                .sum();

            assert!(flipped > 0, "client-{i:04} produced an identical key");
            total_flipped += flipped;
        }

        // 128 bits per key, expect a mean near 64
        let mean = total_flipped as f64 / samples as f64;
        assert!((52.0..=76.0).contains(&mean), "mean bits flipped {mean}");
    }

    #[test]
    fn apply_is_self_inverse() {
        let key = derive_key("acme");
        let block = *b"0123456789abcdef";

        let masked = key.apply(&block);
        assert_ne!(masked, block);
        assert_eq!(key.apply(&masked), block);
    }

    #[test]
    fn debug_does_not_print_key_material() {
        let key = derive_key("acme");
        assert_eq!(format!("{key:?}"), "MaskingKey(len=16)");
    }
}
