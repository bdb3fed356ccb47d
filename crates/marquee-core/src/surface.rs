//! Host render surface consumed by the engine.

use std::fmt;

use uuid::Uuid;

use crate::metrics::MetricsProvider;
use crate::tile::TileSet;

/// Host notification a listener can be installed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    PointerEnter,
    PointerLeave,
    /// Viewport resize or content reflow
    Geometry,
}

/// Identity of one installed listener.
///
/// The engine keeps every id it was handed and removes exactly those on
/// teardown; events arriving for other ids are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(Uuid);

impl ListenerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The region a marquee runs inside.
///
/// `T` is one content item as the host understands it. Measurement comes from
/// the [`MetricsProvider`] supertrait.
pub trait RenderSurface<T>: MetricsProvider<T> {
    /// Whether the region exists and can host a marquee
    fn is_available(&self) -> bool;

    /// Remove and return the region's current content items
    fn take_content(&mut self) -> Vec<T>;

    /// Lay the tile set out in place of the original content.
    ///
    /// Called again after spacing changes.
    fn mount(&mut self, tiles: &TileSet<T>);

    /// Translate the mounted tiles along the scroll axis
    fn set_translation(&mut self, offset: f64);

    /// Drop any translation so nothing is left shifted
    fn clear_translation(&mut self);

    /// Put the original content back and remove tiling artifacts
    fn restore(&mut self, content: Vec<T>);

    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId;

    fn remove_listener(&mut self, id: ListenerId);
}
