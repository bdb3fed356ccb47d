//! Loop clock for the seamless marquee
//!
//! Advances an offset over time and wraps it by the tile distance so the two
//! tiles read as endless content.
//!
//! ## Atomic layer
//! - `timing` - frame deltas, clamping, travel
//! - `wrap` - offset normalization per direction
//!
//! ## Strategies
//! - `stepped` - integrates the offset every tick
//! - `keyframe` - samples a looping keyframe cycle
//!
//! # Usage
//!
//! ```ignore
//! use marquee_core::clock::LoopClock;
//!
//! let mut clock = LoopClock::new(&config);
//! clock.set_distance(Some(520.0));
//!
//! // Each frame, with the time since the previous one
//! let offset = clock.advance(elapsed);
//! ```

pub mod keyframe;
pub mod stepped;
pub mod timing;
pub mod wrap;

use std::time::Duration;

pub use keyframe::{KeyframeClock, Keyframes};
pub use stepped::SteppedClock;
pub use timing::FrameTimer;

use crate::config::{sanitize_rate, ClockStrategy, Direction, MarqueeConfig};
use timing::clamp_elapsed;

#[derive(Debug, Clone)]
enum Strategy {
    Stepped(SteppedClock),
    Keyframed(KeyframeClock),
}

/// Offset driver shared by both strategies
#[derive(Debug, Clone)]
pub struct LoopClock {
    strategy: Strategy,
    direction: Direction,
    max_frame: Duration,
}

impl LoopClock {
    pub fn new(config: &MarqueeConfig) -> Self {
        let rate = sanitize_rate(config.rate);
        let strategy = match config.strategy {
            ClockStrategy::Stepped => Strategy::Stepped(SteppedClock::new(rate, config.direction)),
            ClockStrategy::Keyframed => {
                Strategy::Keyframed(KeyframeClock::new(rate, config.direction))
            }
        };
        Self {
            strategy,
            direction: config.direction,
            max_frame: Duration::from_millis(config.max_frame_ms),
        }
    }

    /// Advance by `elapsed` (clamped to the max frame) and return the offset
    pub fn advance(&mut self, elapsed: Duration) -> f64 {
        let elapsed = clamp_elapsed(elapsed, self.max_frame);
        match &mut self.strategy {
            Strategy::Stepped(clock) => clock.advance(elapsed),
            Strategy::Keyframed(clock) => clock.advance(elapsed),
        }
    }

    pub fn offset(&self) -> f64 {
        match &self.strategy {
            Strategy::Stepped(clock) => clock.offset(),
            Strategy::Keyframed(clock) => clock.offset(),
        }
    }

    /// Non-positive rates fall back to the minimum; they never stop motion
    pub fn set_rate(&mut self, rate: f64) {
        let rate = sanitize_rate(rate);
        match &mut self.strategy {
            Strategy::Stepped(clock) => clock.set_rate(rate),
            Strategy::Keyframed(clock) => clock.set_rate(rate),
        }
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
        match &mut self.strategy {
            Strategy::Stepped(clock) => clock.set_direction(direction),
            Strategy::Keyframed(clock) => clock.set_direction(direction),
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// `None` puts the clock in static mode
    pub fn set_distance(&mut self, distance: Option<f64>) {
        match &mut self.strategy {
            Strategy::Stepped(clock) => clock.set_distance(distance),
            Strategy::Keyframed(clock) => clock.set_distance(distance),
        }
    }

    pub fn distance(&self) -> Option<f64> {
        match &self.strategy {
            Strategy::Stepped(clock) => clock.distance(),
            Strategy::Keyframed(clock) => clock.distance(),
        }
    }

    pub fn set_max_frame(&mut self, max_frame: Duration) {
        self.max_frame = max_frame;
    }

    /// Keyframe description, for hosts that hand playback to their own animator
    pub fn keyframes(&self) -> Option<Keyframes> {
        match &self.strategy {
            Strategy::Stepped(_) => None,
            Strategy::Keyframed(clock) => clock.keyframes(),
        }
    }

    pub fn strategy(&self) -> ClockStrategy {
        match self.strategy {
            Strategy::Stepped(_) => ClockStrategy::Stepped,
            Strategy::Keyframed(_) => ClockStrategy::Keyframed,
        }
    }
}
