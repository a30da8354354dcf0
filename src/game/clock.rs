use std::time::Instant;

/// Monotonic millisecond clock for one session.
///
/// The simulation core never reads wall-clock time itself; every function
/// that needs "now" takes it as a `u64` millisecond argument. This keeps
/// ticks deterministic under test. `GameClock` is the production source of
/// those values, owned by the mode driving the session.
#[derive(Debug, Clone)]
pub struct GameClock {
    origin: Instant,
}

impl GameClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Milliseconds elapsed since the clock was created
    pub fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}
