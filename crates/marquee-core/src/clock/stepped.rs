//! Stepped strategy: integrate the offset on every tick.

use std::time::Duration;

use super::timing::travel;
use super::wrap::{wrap_forward, wrap_reverse};
use crate::config::Direction;

#[derive(Debug, Clone)]
pub struct SteppedClock {
    offset: f64,
    rate: f64,
    direction: Direction,
    distance: Option<f64>,
}

impl SteppedClock {
    pub fn new(rate: f64, direction: Direction) -> Self {
        Self {
            offset: 0.0,
            rate,
            direction,
            distance: None,
        }
    }

    /// Move by `rate * elapsed` and wrap. Static while no usable distance.
    pub fn advance(&mut self, elapsed: Duration) -> f64 {
        let Some(distance) = self.distance else {
            return self.offset;
        };
        let delta = travel(self.rate, elapsed);
        self.offset = match self.direction {
            Direction::Forward => wrap_forward(self.offset - delta, distance),
            Direction::Reverse => wrap_reverse(self.offset + delta, distance),
        };
        self.offset
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn set_rate(&mut self, rate: f64) {
        self.rate = rate;
    }

    /// Only the next tick's rule changes; the offset stays put
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Keep the offset; the next advance re-normalizes it against `distance`
    pub fn set_distance(&mut self, distance: Option<f64>) {
        self.distance = distance;
    }

    pub fn distance(&self) -> Option<f64> {
        self.distance
    }
}
