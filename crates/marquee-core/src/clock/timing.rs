//! Atomic layer: frame timing helpers for the loop clock
//!
//! Pure functions plus a tiny timer that turns tick instants into deltas.

use std::time::{Duration, Instant};

/// Clamp a frame delta so a stalled host can't make the content teleport
#[inline]
pub fn clamp_elapsed(elapsed: Duration, max_frame: Duration) -> Duration {
    elapsed.min(max_frame)
}

/// Distance covered at `rate` units per second over `elapsed`
#[inline]
pub fn travel(rate: f64, elapsed: Duration) -> f64 {
    rate * elapsed.as_secs_f64()
}

/// Tracks the previous tick so each tick can report its delta.
///
/// The first tick after creation or [`FrameTimer::reset`] only seeds the
/// timer and reports zero.
#[derive(Debug, Clone, Default)]
pub struct FrameTimer {
    last: Option<Instant>,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a tick at `now` and return the time since the previous one
    pub fn elapsed(&mut self, now: Instant) -> Duration {
        let elapsed = self
            .last
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or(Duration::ZERO);
        self.last = Some(now);
        elapsed
    }

    /// Forget the previous tick, e.g. after a pause
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn is_seeded(&self) -> bool {
        self.last.is_some()
    }
}
