//! Terminal render surface for the marquee engine
//!
//! A [`TextRegion`] is one rectangle of the terminal holding a row of styled
//! text segments. Widths are terminal columns as reported by `unicode-width`;
//! gaps and translations are rounded to whole columns when painted.

use std::collections::HashMap;

use marquee_core::{ListenerId, ListenerKind, MetricsProvider, RenderSurface, TileSet};
use ratatui::layout::Rect;
use ratatui::style::Style;
use tracing::debug;
use unicode_width::UnicodeWidthStr;

/// One styled run of text inside the marquee
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub text: String,
    pub style: Style,
}

impl Segment {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Style::default())
    }

    /// Width in terminal columns
    pub fn width(&self) -> usize {
        self.text.width()
    }
}

/// Widest gap a terminal region will lay out, in columns
pub const MAX_GAP_COLUMNS: usize = u16::MAX as usize;

/// Whole columns occupied by a gap, capped at [`MAX_GAP_COLUMNS`]
#[inline]
pub fn gap_columns(gap: f64) -> usize {
    gap.round().clamp(0.0, MAX_GAP_COLUMNS as f64) as usize
}

/// A terminal rectangle that can host one marquee
#[derive(Debug, Default)]
pub struct TextRegion {
    /// Placement on screen; `None` until the host lays the region out
    area: Option<Rect>,
    /// Untiled content, present whenever no tiles are mounted
    content: Vec<Segment>,
    tiles: Option<TileSet<Segment>>,
    translation: f64,
    listeners: HashMap<ListenerId, ListenerKind>,
}

impl TextRegion {
    pub fn new(content: Vec<Segment>) -> Self {
        Self {
            content,
            ..Default::default()
        }
    }

    /// Build from plain text, one segment per `separator`-delimited item
    pub fn from_items(text: &str, separator: &str) -> Self {
        let content = text
            .split(separator)
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(Segment::plain)
            .collect();
        Self::new(content)
    }

    pub fn area(&self) -> Option<Rect> {
        self.area
    }

    /// Place the region; follow with a geometry notification when tiled
    pub fn set_area(&mut self, area: Rect) {
        self.area = Some(area);
    }

    pub fn tiles(&self) -> Option<&TileSet<Segment>> {
        self.tiles.as_ref()
    }

    /// Untiled content (empty while mounted)
    pub fn content(&self) -> &[Segment] {
        &self.content
    }

    pub fn translation(&self) -> f64 {
        self.translation
    }

    /// Translation rounded to whole columns
    pub fn column_offset(&self) -> i32 {
        self.translation.round() as i32
    }

    /// Listener ids of `kind`, for routing host events back to the engine
    pub fn listeners_for(&self, kind: ListenerKind) -> Vec<ListenerId> {
        self.listeners
            .iter()
            .filter(|(_, installed)| **installed == kind)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// The text a reader should see, excluding the presentation-only copy
    pub fn primary_text(&self) -> String {
        let items: Vec<&str> = match &self.tiles {
            Some(tiles) => tiles
                .tiles()
                .iter()
                .filter(|tile| !tile.is_duplicate())
                .flat_map(|tile| tile.items())
                .map(|spaced| spaced.item.text.as_str())
                .collect(),
            None => self.content.iter().map(|s| s.text.as_str()).collect(),
        };
        items.join(" ")
    }
}

impl MetricsProvider<Segment> for TextRegion {
    fn measure(&self, tiles: &TileSet<Segment>) -> f64 {
        let source = tiles.source();
        if source.is_empty() {
            return 0.0;
        }
        let gap = gap_columns(tiles.gap());
        let text = source
            .items()
            .iter()
            .fold(0usize, |total, spaced| total.saturating_add(spaced.item.width()));
        let inner_gaps = gap.saturating_mul(source.items().len() - 1);
        text.saturating_add(inner_gaps).saturating_add(gap) as f64
    }
}

impl RenderSurface<Segment> for TextRegion {
    fn is_available(&self) -> bool {
        self.area.is_some()
    }

    fn take_content(&mut self) -> Vec<Segment> {
        std::mem::take(&mut self.content)
    }

    fn mount(&mut self, tiles: &TileSet<Segment>) {
        self.tiles = Some(tiles.clone());
    }

    fn set_translation(&mut self, offset: f64) {
        self.translation = offset;
    }

    fn clear_translation(&mut self) {
        self.translation = 0.0;
    }

    fn restore(&mut self, content: Vec<Segment>) {
        self.tiles = None;
        self.content = content;
    }

    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId {
        let id = ListenerId::new();
        self.listeners.insert(id, kind);
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        if self.listeners.remove(&id).is_none() {
            debug!(%id, "removing listener that was never installed");
        }
    }
}
