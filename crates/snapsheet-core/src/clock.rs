use web_time::{Duration, Instant};

/// Monotonic clock producing frame timestamps in nanoseconds.
///
/// Timestamps are measured from the moment the clock was created, which keeps
/// them small enough for `u64` arithmetic in the spring integrator.
#[derive(Clone, Copy, Debug)]
pub struct StdClock {
    origin: Instant,
}

impl StdClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn now_nanos(&self) -> u64 {
        self.nanos_at(Instant::now())
    }

    /// Nanoseconds between the clock origin and `instant`, saturating at zero.
    pub fn nanos_at(&self, instant: Instant) -> u64 {
        instant
            .checked_duration_since(self.origin)
            .unwrap_or(Duration::ZERO)
            .as_nanos() as u64
    }

    pub fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }
}

impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}
