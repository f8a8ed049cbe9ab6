use thiserror::Error;

/// Ways a string can fail to be a well-formed customer identifier.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    #[error("customer id must be 26 characters: {0} bytes found")]
    Length(usize),

    #[error("invalid character {byte:#04x} at position {position}")]
    InvalidCharacter { position: usize, byte: u8 },

    #[error("trailing padding bits are not zero")]
    TrailingBits,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed customer id: {0}")]
    Format(#[from] FormatError),

    /// The secure random source failed. Generating an identifier without fresh randomness is
    /// unsafe, so callers should treat this as fatal.
    #[error("secure random source unavailable")]
    EntropyUnavailable,
}
