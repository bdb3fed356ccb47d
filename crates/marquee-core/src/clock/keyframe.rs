//! Keyframed strategy: a looping `from 0 to -distance` cycle.
//!
//! Progress through the cycle is what accumulates; the offset is sampled from
//! it. Any change to direction, rate or distance re-anchors progress on the
//! current offset so playback never jumps.

use std::time::Duration;

use super::timing::travel;
use super::wrap::{positive_zero, wrap};
use crate::config::Direction;

/// Declarative description of one loop cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframes {
    /// Translation covered by one cycle
    pub travel: f64,
    /// Cycle length, `travel / rate`
    pub duration: Duration,
    /// Play the cycle backwards (from `-travel` towards 0)
    pub reverse: bool,
}

#[derive(Debug, Clone)]
pub struct KeyframeClock {
    /// Fraction of the current cycle, in `[0, 1)`
    progress: f64,
    /// Last sampled offset
    offset: f64,
    rate: f64,
    direction: Direction,
    distance: Option<f64>,
}

impl KeyframeClock {
    pub fn new(rate: f64, direction: Direction) -> Self {
        Self {
            progress: 0.0,
            offset: 0.0,
            rate,
            direction,
            distance: None,
        }
    }

    pub fn advance(&mut self, elapsed: Duration) -> f64 {
        let Some(distance) = self.distance else {
            return self.offset;
        };
        let step = travel(self.rate, elapsed) / distance;
        self.progress = (self.progress + step).rem_euclid(1.0);
        self.offset = sample(self.progress, distance, self.direction);
        self.offset
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Progress is kept, so only the cycle duration changes
    pub fn set_rate(&mut self, rate: f64) {
        self.rate = rate;
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
        self.reanchor();
    }

    pub fn set_distance(&mut self, distance: Option<f64>) {
        self.distance = distance;
        self.reanchor();
    }

    pub fn distance(&self) -> Option<f64> {
        self.distance
    }

    pub fn keyframes(&self) -> Option<Keyframes> {
        let distance = self.distance?;
        Some(Keyframes {
            travel: distance,
            // Saturates for cycles longer than a Duration can hold
            duration: Duration::try_from_secs_f64(distance / self.rate).unwrap_or(Duration::MAX),
            reverse: self.direction == Direction::Reverse,
        })
    }

    /// Fraction of the cycle already played
    pub fn progress(&self) -> f64 {
        self.progress
    }

    fn reanchor(&mut self) {
        let Some(distance) = self.distance else {
            return;
        };
        let offset = wrap(self.offset, distance, self.direction);
        self.progress = match self.direction {
            Direction::Forward => -offset / distance,
            Direction::Reverse => 1.0 + offset / distance,
        }
        .rem_euclid(1.0);
    }
}

/// Offset at `progress` through a cycle of `distance`
fn sample(progress: f64, distance: f64, direction: Direction) -> f64 {
    match direction {
        Direction::Forward => positive_zero(-progress * distance),
        Direction::Reverse => -(1.0 - progress) * distance,
    }
}
