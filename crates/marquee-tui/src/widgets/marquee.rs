use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Widget},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::surface::{gap_columns, Segment, TextRegion};
use crate::theme::Theme;

/// Paints the visible window of a region's tiles at its current translation
pub struct MarqueeView<'a> {
    region: &'a TextRegion,
    theme: &'a Theme,
}

impl<'a> MarqueeView<'a> {
    pub fn new(region: &'a TextRegion, theme: &'a Theme) -> Self {
        Self { region, theme }
    }
}

impl Widget for MarqueeView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.theme.bg0).fg(self.theme.fg0));
        if area.width == 0 || area.height == 0 {
            return;
        }

        let y = area.y + area.height / 2;
        match self.region.tiles() {
            Some(tiles) => {
                let mut x = i32::from(area.x).saturating_add(self.region.column_offset());
                for tile in tiles.tiles() {
                    for spaced in tile.items() {
                        x = paint_segment(buf, area, x, y, &spaced.item);
                        let gap = i32::try_from(gap_columns(spaced.trailing_gap)).unwrap_or(i32::MAX);
                        x = x.saturating_add(gap);
                    }
                }
            }
            // Not tiled: show the content as-is
            None => {
                let mut x = area.x as i32;
                for segment in self.region.content() {
                    x = paint_segment(buf, area, x, y, segment).saturating_add(1);
                }
            }
        }
    }
}

/// Write `segment` starting at column `x`, clipping to `area`; returns the
/// column after it
fn paint_segment(buf: &mut Buffer, area: Rect, mut x: i32, y: u16, segment: &Segment) -> i32 {
    let left = area.left() as i32;
    let right = area.right() as i32;

    for ch in segment.text.chars() {
        let width = ch.width().unwrap_or(0) as i32;
        if width == 0 {
            continue;
        }
        if x >= left && x.saturating_add(width) <= right {
            if let Some(cell) = buf.cell_mut((x as u16, y)) {
                cell.set_char(ch).set_style(segment.style);
            }
            // trailing half of a wide character
            for dx in 1..width {
                if let Some(cell) = buf.cell_mut(((x + dx) as u16, y)) {
                    cell.reset();
                }
            }
        }
        x = x.saturating_add(width);
        if x >= right {
            break;
        }
    }
    x
}

pub struct MarqueeWidget;

impl MarqueeWidget {
    /// Draw the framed band and the marquee row inside it
    pub fn render(frame: &mut Frame, band: Rect, region: &TextRegion, theme: &Theme) {
        let block = Block::bordered()
            .border_style(Style::default().fg(theme.accent).bg(theme.bg0))
            .style(Style::default().bg(theme.bg0));
        let inner = block.inner(band);
        frame.render_widget(block, band);
        frame.render_widget(MarqueeView::new(region, theme), inner);
    }
}
