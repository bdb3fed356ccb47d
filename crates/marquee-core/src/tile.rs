//! Tile builder: turns one content block into a two-tile loop.
//!
//! The canonical tile owns the caller's items; the duplicate is a structural
//! copy that exists only so the window never shows an edge. Spacing is applied
//! to every item in both tiles, so the two always measure the same.

/// One content item with the spacing that follows it
#[derive(Debug, Clone, PartialEq)]
pub struct Spaced<T> {
    pub item: T,
    pub trailing_gap: f64,
}

/// One complete copy of the content
#[derive(Debug, Clone, PartialEq)]
pub struct Tile<T> {
    items: Vec<Spaced<T>>,
    is_duplicate: bool,
}

impl<T> Tile<T> {
    pub fn items(&self) -> &[Spaced<T>] {
        &self.items
    }

    /// Presentation-only copy; hosts should hide it from assistive queries
    pub fn is_duplicate(&self) -> bool {
        self.is_duplicate
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn apply_gap(&mut self, gap: f64) {
        for spaced in &mut self.items {
            spaced.trailing_gap = gap;
        }
    }
}

impl<T: Clone> Tile<T> {
    fn duplicate(&self) -> Self {
        Self {
            items: self.items.clone(),
            is_duplicate: true,
        }
    }
}

/// Source tile followed by exactly one duplicate
#[derive(Debug, Clone, PartialEq)]
pub struct TileSet<T> {
    tiles: [Tile<T>; 2],
    gap: f64,
}

impl<T: Clone> TileSet<T> {
    /// Build the loop from the caller's items.
    ///
    /// An empty source still yields a structurally valid set; its distance
    /// measures as zero and the engine keeps it static.
    pub fn build(source: Vec<T>, gap: f64) -> Self {
        let items = source
            .into_iter()
            .map(|item| Spaced {
                item,
                trailing_gap: gap,
            })
            .collect();
        let canonical = Tile {
            items,
            is_duplicate: false,
        };
        let duplicate = canonical.duplicate();

        Self {
            tiles: [canonical, duplicate],
            gap,
        }
    }
}

impl<T> TileSet<T> {
    pub fn gap(&self) -> f64 {
        self.gap
    }

    /// Re-apply spacing uniformly to every item of both tiles
    pub fn set_gap(&mut self, gap: f64) {
        self.gap = gap;
        for tile in &mut self.tiles {
            tile.apply_gap(gap);
        }
    }

    pub fn tiles(&self) -> &[Tile<T>; 2] {
        &self.tiles
    }

    pub fn source(&self) -> &Tile<T> {
        &self.tiles[0]
    }

    pub fn duplicate(&self) -> &Tile<T> {
        &self.tiles[1]
    }

    /// Tear the loop down, handing back the original items in order
    pub fn into_source(self) -> Vec<T> {
        let [source, _duplicate] = self.tiles;
        source.items.into_iter().map(|spaced| spaced.item).collect()
    }
}

/// Tile distance for a source tile of `length` followed by `gap`.
///
/// `length` is the tile's rendered extent with spacing between items but
/// without the trailing gap after the last one.
#[inline]
pub fn tile_distance(length: f64, gap: f64) -> f64 {
    length + gap
}

/// Measure the source tile with a per-item width function.
///
/// Items are separated by the gap; the gap after the last item is the
/// inter-tile gap and is included, so the result is the wrap period.
pub fn measure_with<T, F>(tiles: &TileSet<T>, mut width: F) -> f64
where
    F: FnMut(&T) -> f64,
{
    let source = tiles.source();
    if source.is_empty() {
        return 0.0;
    }
    let mut length = 0.0;
    for (index, spaced) in source.items().iter().enumerate() {
        if index > 0 {
            length += source.items()[index - 1].trailing_gap;
        }
        length += width(&spaced.item);
    }
    tile_distance(length, tiles.gap())
}
