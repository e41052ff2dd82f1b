//! Monotonic time base for the rendering runtime's animations.

use core::sync::atomic::{AtomicU32, Ordering};

/// Period of the external tick source, in milliseconds.
pub const TICK_INTERVAL_MS: u32 = 2;

/// Millisecond counter advanced by a periodic timer.
///
/// [`tick`](FrameClock::tick) runs in a time-critical timer context, so it
/// is O(1), non-blocking, allocation-free, and touches nothing but this
/// single word. The main loop reads it with [`now`](FrameClock::now);
/// single-writer single-word, so relaxed ordering is sufficient.
#[derive(Debug, Default)]
pub struct FrameClock {
    millis: AtomicU32,
}

impl FrameClock {
    pub const fn new() -> Self {
        Self {
            millis: AtomicU32::new(0),
        }
    }

    /// Advance by one tick period. Called by the timer every
    /// [`TICK_INTERVAL_MS`] milliseconds.
    pub fn tick(&self) {
        self.millis.fetch_add(TICK_INTERVAL_MS, Ordering::Relaxed);
    }

    /// Current value of the time base in milliseconds.
    pub fn now(&self) -> u32 {
        self.millis.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_advances_by_interval_per_tick() {
        let clock = FrameClock::new();
        assert_eq!(clock.now(), 0);
        for n in 1..=1000u32 {
            clock.tick();
            assert_eq!(clock.now(), TICK_INTERVAL_MS * n);
        }
    }
}
