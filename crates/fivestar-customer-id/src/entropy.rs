//! Random bytes for new identifiers.

use tracing::error;

use crate::error::Error;

/// Supplies the random part of a payload.
///
/// Production code must use a cryptographically secure source. Predictable entropy would let
/// one identifier be guessed from another. Implementations are shared between threads.
pub trait EntropySource: Send + Sync {
    /// Fill `dest` entirely with random bytes, or fail with [`Error::EntropyUnavailable`].
    fn fill(&self, dest: &mut [u8]) -> Result<(), Error>;
}

/// The operating system CSPRNG as exposed by aws-lc.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEntropy;

impl EntropySource for SystemEntropy {
    fn fill(&self, dest: &mut [u8]) -> Result<(), Error> {
        aws_lc_rs::rand::fill(dest).map_err(|_| {
            error!("secure random source failed to produce {} bytes", dest.len());
            Error::EntropyUnavailable
        })
    }
}

/// Repeats a fixed byte pattern. Deterministic, for tests, benchmarks and fuzzing only:
/// identifiers minted from it are predictable.
#[doc(hidden)]
#[derive(Debug, Clone)]
pub struct FixedEntropy {
    pattern: Vec<u8>,
}

impl FixedEntropy {
    pub fn new(pattern: &[u8]) -> Self {
        assert!(!pattern.is_empty(), "pattern must not be empty");
        Self {
            pattern: pattern.to_vec(),
        }
    }
}

impl EntropySource for FixedEntropy {
    fn fill(&self, dest: &mut [u8]) -> Result<(), Error> {
        dest.iter_mut()
            .zip(self.pattern.iter().cycle())
            .for_each(|(d, p)| *d = *p);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_entropy_differs_between_calls() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];

        SystemEntropy.fill(&mut a).unwrap();
        SystemEntropy.fill(&mut b).unwrap();

        // Should be different (extremely high probability)
        assert_ne!(a, b);
    }

    #[test]
    fn fixed_entropy_cycles_pattern() {
        let source = FixedEntropy::new(&[1, 2, 3]);
        let mut buf = [0u8; 7];

        source.fill(&mut buf).unwrap();
        assert_eq!(buf, [1, 2, 3, 1, 2, 3, 1]);
    }

    #[test]
    #[should_panic(expected = "pattern must not be empty")]
    fn fixed_entropy_rejects_empty_pattern() {
        FixedEntropy::new(&[]);
    }
}
