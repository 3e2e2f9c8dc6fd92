//! Simulated round-trip latency for the in-memory record store.

use std::time::Duration;

use rand::Rng;

/// Uniformly distributed delay in `[min, max]` awaited before each store call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Latency {
    min_ms: u64,
    max_ms: u64,
}

impl Latency {
    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        if min_ms <= max_ms { Self { min_ms, max_ms } } else { Self { min_ms: max_ms, max_ms: min_ms } }
    }

    /// No delay at all; used by tests and benches.
    pub fn none() -> Self { Self { min_ms: 0, max_ms: 0 } }

    pub fn bounds(&self) -> (Duration, Duration) {
        (Duration::from_millis(self.min_ms), Duration::from_millis(self.max_ms))
    }

    pub fn sample(&self) -> Duration {
        if self.min_ms == self.max_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(rand::thread_rng().gen_range(self.min_ms..=self.max_ms))
    }

    pub async fn simulate(&self) {
        let delay = self.sample();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for Latency {
    fn default() -> Self { Self::from_millis(300, 500) }
}
