use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering::SeqCst;
#[cfg(test)]
use std::time::Duration;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::warn;

use ClockSource::{Mock, System};

/// A source of time for the timestamp part of a payload.
#[derive(Debug, Clone, Default)]
pub enum ClockSource {
    /// Clock source based on the system clock.
    #[default]
    System,

    /// Only for testing and benchmarking.
    Mock(Arc<AtomicU64>),
}

impl ClockSource {
    pub fn new_mock(now_millis: u64) -> ClockSource {
        Mock(Arc::new(AtomicU64::new(now_millis)))
    }

    /// Returns the number of milliseconds since the UNIX epoch.
    ///
    /// A system clock set before 1970 reads as zero. The identifier stays unique through its
    /// entropy bits, so this is logged rather than treated as an error.
    pub fn epoch_millis(&self) -> u64 {
        match self {
            System => match SystemTime::now().duration_since(UNIX_EPOCH) {
                Ok(n) => n.as_millis() as u64,
                Err(e) => {
                    warn!("system time is before the UNIX epoch: {e}");
                    0
                }
            },
            Mock(now) => now.load(SeqCst),
        }
    }

    /// Sets the current time of this Mock clock.
    /// For test use only.
    pub fn set_time(&mut self, now_millis: u64) {
        match self {
            System => unreachable!(),
            Mock(n) => n.store(now_millis, SeqCst),
        }
    }

    /// Increases the current time of this Mock clock by the given duration.
    /// For test use only.
    #[cfg(test)]
    pub fn advance(&mut self, delta: Duration) {
        match self {
            System => unreachable!(),
            Mock(n) => n.store(n.load(SeqCst) + delta.as_millis() as u64, SeqCst),
        }
    }
}
