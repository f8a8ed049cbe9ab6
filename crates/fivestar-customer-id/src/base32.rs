//! Crockford base32 for 128-bit values.
//!
//! 128 bits do not divide evenly into 5-bit symbols. The encoded form is 26 symbols (130 bits)
//! and the last symbol carries two zero padding bits. Decoding accepts either letter case and
//! rejects `I`, `L`, `O` and `U` outright rather than aliasing them to digits.

use std::sync::LazyLock;

use data_encoding::{DecodeKind, Encoding, Specification};

use crate::error::FormatError;

/// Crockford's alphabet, no `I`, `L`, `O`, or `U`
pub const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Number of symbols in an encoded 128-bit value
pub const ENCODED_LEN: usize = 26;

/// Number of bytes in a decoded value
pub const DECODED_LEN: usize = 16;

const INVALID: u8 = 0xff;

/// Symbol value for every byte, `INVALID` for bytes outside the alphabet.
static SYMBOL_VALUES: [u8; 256] = symbol_table();

const fn symbol_table() -> [u8; 256] {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        let symbol = ALPHABET[i];
        table[symbol as usize] = i as u8;
        table[symbol.to_ascii_lowercase() as usize] = i as u8;
        i += 1;
    }
    table
}

static CROCKFORD: LazyLock<Encoding> = LazyLock::new(|| {
    let mut spec = Specification::new();
    spec.symbols.push_str(std::str::from_utf8(ALPHABET).expect("should be infallible"));
    spec.translate.from.push_str("abcdefghjkmnpqrstvwxyz");
    spec.translate.to.push_str("ABCDEFGHJKMNPQRSTVWXYZ");
    spec.check_trailing_bits = true;
    spec.encoding().expect("should be infallible")
});

/// True if `byte` is a Crockford symbol in either case.
#[inline]
pub fn is_symbol(byte: u8) -> bool {
    SYMBOL_VALUES[byte as usize] != INVALID
}

/// Encode 16 bytes as 26 upper-case symbols, most significant bit first.
pub fn encode(bytes: &[u8; DECODED_LEN]) -> String {
    CROCKFORD.encode(bytes)
}

/// Decode 26 symbols back into 16 bytes.
pub fn decode(text: &str) -> Result<[u8; DECODED_LEN], FormatError> {
    let input = text.as_bytes();

    if input.len() != ENCODED_LEN {
        return Err(FormatError::Length(input.len()));
    }

    if let Some(position) = input.iter().position(|&b| !is_symbol(b)) {
        return Err(FormatError::InvalidCharacter {
            position,
            byte: input[position],
        });
    }

    let mut output = [0u8; DECODED_LEN];
    CROCKFORD
        .decode_mut(input, &mut output)
        .map_err(|partial| match partial.error.kind {
            DecodeKind::Trailing => FormatError::TrailingBits,
            DecodeKind::Symbol => FormatError::InvalidCharacter {
                position: partial.error.position,
                byte: input[partial.error.position],
            },
            _ => FormatError::Length(input.len()),
        })?;

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabet_excludes_ambiguous_letters() {
        for letter in [b'I', b'L', b'O', b'U', b'i', b'l', b'o', b'u'] {
            assert!(!is_symbol(letter), "{} accepted", letter as char);
        }
    }

    #[test]
    fn symbol_table_covers_both_cases() {
        for &symbol in ALPHABET {
            assert!(is_symbol(symbol));
            assert!(is_symbol(symbol.to_ascii_lowercase()));
        }

        let accepted = (0..=255u8).filter(|&b| is_symbol(b)).count();
        // 10 digits + 22 letters in two cases
        assert_eq!(accepted, 10 + 22 * 2);
    }

    #[test]
    fn encode_extremes() {
        assert_eq!(encode(&[0u8; 16]), "00000000000000000000000000");
        assert_eq!(encode(&[0xffu8; 16]), "ZZZZZZZZZZZZZZZZZZZZZZZZZW");
    }

    #[test]
    fn encode_known_value() {
        let bytes: [u8; 16] = [
            0x01, 0x8b, 0xcf, 0xe5, 0x68, 0x00, 0x42, 0x42, 0x42, 0x42, 0x42, 0x42, 0x42, 0x42,
            0x42, 0xdf,
        ];
        assert_eq!(encode(&bytes), "065WZSB801144GJ289144GJ2VW");
        assert_eq!(decode("065WZSB801144GJ289144GJ2VW").unwrap(), bytes);
    }

    #[test]
    fn decode_is_case_insensitive() {
        let upper = decode("ZZZZZZZZZZZZZZZZZZZZZZZZZW").unwrap();
        let lower = decode("zzzzzzzzzzzzzzzzzzzzzzzzzw").unwrap();
        let mixed = decode("zZzZzZzZzZzZzZzZzZzZzZzZzW").unwrap();

        assert_eq!(upper, [0xffu8; 16]);
        assert_eq!(upper, lower);
        assert_eq!(upper, mixed);
    }

    #[test]
    fn decode_rejects_wrong_length() {
        assert_eq!(decode(""), Err(FormatError::Length(0)));
        assert_eq!(decode(&"0".repeat(25)), Err(FormatError::Length(25)));
        assert_eq!(decode(&"0".repeat(27)), Err(FormatError::Length(27)));
    }

    #[test]
    fn decode_rejects_symbols_outside_alphabet() {
        assert_eq!(
            decode("0000000000000I000000000000"),
            Err(FormatError::InvalidCharacter {
                position: 13,
                byte: b'I'
            })
        );
        assert_eq!(
            decode("u0000000000000000000000000"),
            Err(FormatError::InvalidCharacter {
                position: 0,
                byte: b'u'
            })
        );
        assert!(matches!(
            decode("000000000000000000000000-0"),
            Err(FormatError::InvalidCharacter { position: 24, .. })
        ));
    }

    #[test]
    fn decode_rejects_nonzero_padding_bits() {
        // 'S' is 25 = 0b11001, one padding bit set
        assert_eq!(
            decode("0123456789ABCDEFGHJKMNPQRS"),
            Err(FormatError::TrailingBits)
        );
        // '1' sets only the lowest padding bit
        assert_eq!(
            decode("00000000000000000000000001"),
            Err(FormatError::TrailingBits)
        );
        // '4' = 0b00100 is the lowest data bit and decodes fine
        assert!(decode("00000000000000000000000004").is_ok());
    }

    #[test]
    fn multibyte_characters_are_rejected_by_length() {
        // 26 chars but 27 bytes
        assert_eq!(
            decode("é0000000000000000000000000"),
            Err(FormatError::Length(27))
        );
    }
}
