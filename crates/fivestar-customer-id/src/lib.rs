//! Customer identifiers for FiveStar clients.
//!
//! A customer identifier is a 26 character Crockford base32 string that can be checked offline.
//! Underneath it is a 128-bit [`Payload`](payload::Payload):
//!
//! ```text
//!  0               6                              15   16
//!  +---------------+-------------------------------+----+
//!  | timestamp, ms |        random entropy         |tag |
//!  |    48 bits    |            72 bits            | 8b |
//!  +---------------+-------------------------------+----+
//! ```
//!
//! The payload is XOR-masked with a [`MaskingKey`](key::MaskingKey) derived from the owning client
//! identifier. Unmasking with any other client's key scrambles the bits, so the 8-bit integrity
//! tag no longer matches, except for about one identifier in 256.
//!
//! ```
//! use fivestar_customer_id::{decode, generate, is_valid_format, verify};
//!
//! let client_id = "test-client-123";
//! let customer_id = generate(client_id).unwrap();
//!
//! assert_eq!(customer_id.len(), 26);
//! assert!(is_valid_format(&customer_id));
//! assert!(verify(&customer_id, client_id));
//! assert!(decode(&customer_id, client_id).is_some());
//!
//! // Minted for "test-client-123", rejected for any other client
//! assert!(verify("0861PPWWZ7BXYNSVMMCTDE26N0", client_id));
//! assert!(!verify("0861PPWWZ7BXYNSVMMCTDE26N0", "other-client"));
//! ```

#![forbid(unsafe_code)]

pub mod base32;
pub mod clocksource;
pub mod customer_id;
pub mod entropy;
pub mod error;
pub mod key;
pub mod payload;

pub use customer_id::{
    Generator, GeneratorBuilder, decode, decode_payload, generate, is_valid_format, verify,
};
pub use error::{Error, FormatError};
