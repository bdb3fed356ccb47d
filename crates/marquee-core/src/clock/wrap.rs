//! Atomic layer: offset normalization
//!
//! Forward motion keeps the offset in `(-distance, 0]`, reverse motion in
//! `[-distance, 0)`. Both use `%`, the closed form of repeatedly adding or
//! subtracting one distance, so arbitrarily large steps still land in range.

use crate::config::Direction;

/// Normalize into `(-distance, 0]`
#[inline]
pub fn wrap_forward(offset: f64, distance: f64) -> f64 {
    let mut r = offset % distance;
    if r > 0.0 {
        r -= distance;
    }
    if r <= -distance {
        r = 0.0;
    }
    positive_zero(r)
}

/// Normalize into `[-distance, 0)`
#[inline]
pub fn wrap_reverse(offset: f64, distance: f64) -> f64 {
    let r = offset % distance;
    if r >= 0.0 {
        r - distance
    } else {
        r
    }
}

#[inline]
pub fn wrap(offset: f64, distance: f64, direction: Direction) -> f64 {
    match direction {
        Direction::Forward => wrap_forward(offset, distance),
        Direction::Reverse => wrap_reverse(offset, distance),
    }
}

/// Collapse `-0.0` so rendered transforms never print a signed zero
#[inline]
pub(crate) fn positive_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_wraps_exactly_at_distance() {
        assert_eq!(wrap_forward(-520.0, 520.0), 0.0);
        assert!(wrap_forward(-520.0, 520.0).is_sign_positive());
        assert_eq!(wrap_forward(-530.0, 520.0), -10.0);
        assert_eq!(wrap_forward(-10.0, 520.0), -10.0);
    }

    #[test]
    fn test_forward_handles_many_periods() {
        let r = wrap_forward(-520.0 * 1000.0 - 7.0, 520.0);
        assert!((r + 7.0).abs() < 1e-6);
    }

    #[test]
    fn test_forward_moves_positive_into_range() {
        assert_eq!(wrap_forward(20.0, 520.0), -500.0);
    }

    #[test]
    fn test_reverse_never_reaches_zero() {
        assert_eq!(wrap_reverse(0.0, 520.0), -520.0);
        assert_eq!(wrap_reverse(10.0, 520.0), -510.0);
        assert_eq!(wrap_reverse(-10.0, 520.0), -10.0);
        assert_eq!(wrap_reverse(520.0 * 3.0 + 5.0, 520.0), -515.0);
    }

    #[test]
    fn test_reverse_keeps_far_negative_in_range() {
        let r = wrap_reverse(-1040.0 - 4.0, 520.0);
        assert!((r + 4.0).abs() < 1e-9);
    }
}
