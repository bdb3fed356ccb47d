//! Metrics contract between the engine and whatever lays the tiles out.

use crate::tile::TileSet;

/// Reports the wrap period of a tile set on the current layout.
///
/// Implementations must be pure queries: callable at any time, never mutating
/// layout. The returned value is the source tile's length plus its trailing
/// gap.
pub trait MetricsProvider<T> {
    fn measure(&self, tiles: &TileSet<T>) -> f64;
}

/// A measured tile distance that is safe to wrap against.
///
/// Zero, negative and non-finite measurements collapse to `None`, which the
/// engine treats as static mode.
#[inline]
pub fn usable_distance(measured: f64) -> Option<f64> {
    if measured.is_finite() && measured > 0.0 {
        Some(measured)
    } else {
        None
    }
}
